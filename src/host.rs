//! Host flow: configure the builder, load modules, run the application.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use plugboard_config::{
    module_dirs_key, module_files_key, ConfigLoader, ConfigValidator, HostConfiguration,
    ValidationResult,
};
use plugboard_core::{BuildError, Builder, Component, Service};
use plugboard_modules::LibraryModuleLoader;
use plugboard_protocols::{Application, Configuration, ModuleLoader, ModuleRecord};

/// Type resolved as the configuration of the host.
pub(crate) const HOST_CONFIGURATION: &str = "HostConfiguration";

/// What the host was asked to run.
#[derive(Debug, Clone)]
pub(crate) struct HostOptions {
    pub file: Option<PathBuf>,
    pub section: String,
    pub application: String,
    pub args: Vec<String>,
}

/// Run the host flow and return the process exit status.
pub(crate) fn run(builder: &Builder, options: &HostOptions) -> i32 {
    let file = options.file.clone().unwrap_or_else(ConfigLoader::default_config_file);
    info!("Using configuration file {:?} (section '{}')", file, options.section);
    HostConfiguration::set_file(&file);

    // Held for the whole run so the configuration stays cached.
    let _configuration = install_configuration(builder, &options.section);

    let loader = match resolve_module_loader(builder) {
        Ok(loader) => loader,
        Err(e) => {
            error!("No module loader available: {}", e);
            return 1;
        }
    };
    loader.subscribe(Arc::new(|record: &ModuleRecord| {
        info!(
            "Module loaded: {:?} name='{}' version='{}'",
            record.path, record.name, record.version
        );
    }));

    let count = load_modules(builder, &*loader, &options.section);
    info!("Loaded {} module(s)", count);

    match builder.get_as::<dyn Application>(&options.application) {
        Ok(application) => {
            info!("Running {}", application.instance().type_name());
            application.main(&options.args)
        }
        Err(e) => {
            error!("Cannot run {}: {}", options.application, e);
            1
        }
    }
}

/// Resolve the host configuration, install it and report validation findings.
fn install_configuration(builder: &Builder, section: &str) -> Option<Service<dyn Configuration>> {
    let configuration = match builder.get_as::<dyn Configuration>(HOST_CONFIGURATION) {
        Ok(configuration) => configuration,
        Err(e) => {
            warn!("Continuing without configuration: {}", e);
            return None;
        }
    };

    builder.set_configuration(Arc::clone(configuration.view()), section);
    report(&validate(&configuration, section));
    Some(configuration)
}

fn validate(configuration: &Service<dyn Configuration>, section: &str) -> ValidationResult {
    match configuration.instance().downcast_ref::<HostConfiguration>() {
        Some(host) => ConfigValidator::validate_entries(&host.snapshot(), section),
        None => ConfigValidator::validate(&**configuration, section),
    }
}

fn report(result: &ValidationResult) {
    for warning in &result.warnings {
        warn!("Configuration {}: {}", warning.key, warning.message);
    }
    for error in &result.errors {
        error!("Configuration {}: {}", error.key, error.message);
    }
}

/// Resolve the module loader the deployment asks for, defaulting to the
/// library loader when nothing is mapped to `ModuleLoader`.
fn resolve_module_loader(builder: &Builder) -> Result<Service<dyn ModuleLoader>, BuildError> {
    match builder.get_service::<dyn ModuleLoader>() {
        Err(BuildError::TypeNotFound { .. }) => {
            builder.get_as::<dyn ModuleLoader>(LibraryModuleLoader::TYPE_NAME)
        }
        other => other,
    }
}

/// Load every directory listed under `@module_dirs`, then every file under
/// `@module_files`, returning the number of modules loaded.
fn load_modules(builder: &Builder, loader: &dyn ModuleLoader, section: &str) -> usize {
    let Some(configuration) = builder.configuration() else {
        return 0;
    };

    let mut count = 0;
    for dir in paths(&*configuration, &module_dirs_key(section)) {
        count += loader.load_modules_from_dir(&dir);
    }
    for file in paths(&*configuration, &module_files_key(section)) {
        if loader.load_module(&file) {
            count += 1;
        }
    }
    count
}

fn paths(configuration: &dyn Configuration, key: &str) -> Vec<PathBuf> {
    configuration
        .get(key)
        .map(|value| value.to_string_list())
        .unwrap_or_default()
        .iter()
        .map(|path| PathBuf::from(ConfigLoader::expand_path(path)))
        .collect()
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
