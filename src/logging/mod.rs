//! Tracing filter construction

use crate::config::LoggingConfig;

/// Build filter directives string from LoggingConfig
///
/// The result is the base level followed by one `netpath::<component>=<level>`
/// directive per configured component, e.g.
/// `"info,netpath::snapshot=debug,netpath::watcher=trace"`.
///
/// # Examples
///
/// ```
/// use netpath::config::LoggingConfig;
/// use netpath::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("routing".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     component_levels: Some(component_levels),
///     ..LoggingConfig::default()
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,netpath::routing=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",netpath::{}={}", component, level));
        }
    }

    filter_str
}
