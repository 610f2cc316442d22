use crate::args::InputArgs;
use crate::output::Style;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use rankscope_sdk::types::{Timestamp, TraceFormat};
use rankscope_sdk::{Config, LoadOptions, LoadedTrace, load_trace};

/// Settings every handler needs
pub struct HandlerContext {
    pub config: Config,
    pub format: OutputFormat,
    pub style: Style,
}

impl HandlerContext {
    pub fn new(config: Config, format: OutputFormat) -> Self {
        Self {
            config,
            format,
            style: Style::detect(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Command-line flags override the config file
    pub fn load_options(&self, input: &InputArgs) -> LoadOptions {
        let mut annotation = self.config.annotation_options();
        if let Some(split) = input.split {
            annotation = annotation.with_split(split);
        }
        if input.mpi_functions {
            annotation = annotation.with_mpi_function_names(true);
        }

        let mut options = LoadOptions::default().with_annotation(annotation);
        if input.annotation {
            options = options.with_format(TraceFormat::Annotation);
        } else if input.simple {
            options = options.with_format(TraceFormat::Simple);
        }
        options
    }

    pub fn load(&self, input: &InputArgs) -> Result<LoadedTrace> {
        let options = self.load_options(input);
        load_trace(&input.file, &options)
            .with_context(|| format!("Failed to load {}", input.file.display()))
    }

    pub fn min_duration(&self, flag: Option<Timestamp>) -> Timestamp {
        flag.unwrap_or(self.config.view.min_duration)
    }
}
