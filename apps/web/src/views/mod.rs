//! Server-side page templates.
//!
//! Templates are Handlebars files read from the template directory at startup.
//! In dev mode the registry re-reads each file before rendering.

use std::path::Path;

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

/// The pages this front end renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Job,
    Thanks,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Index, Page::Job, Page::Thanks];

    pub fn name(self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Job => "job",
            Page::Thanks => "thanks",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Job => "job.html",
            Page::Thanks => "thanks.html",
        }
    }
}

pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn load(dir: &Path, dev_mode: bool) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_dev_mode(dev_mode);
        for page in Page::ALL {
            registry.register_template_file(page.name(), dir.join(page.file_name()))?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, page: Page, context: &T) -> Result<String, RenderError> {
        self.registry.render(page.name(), context)
    }
}
