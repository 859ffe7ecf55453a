// codelab Configuration
// Edit this file to change the default keys and settings, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Visualizer stepping
    config.bind("Right", "viz-next-step");
    config.bind("l", "viz-next-step");
    config.bind("Left", "viz-previous-step");
    config.bind("h", "viz-previous-step");
    config.bind("Space", "viz-toggle-play");
    config.bind("p", "viz-play");
    config.bind("s", "viz-pause");
    config.bind("r", "viz-reset");

    // Search and replace
    config.bind("/", "search");
    config.bind("n", "search-next-match");
    config.bind("N", "search-previous-match");
    config.bind("c", "replace-current");
    config.bind("a", "replace-all");
    config.bind("i", "toggle-case-sensitive");
    config.bind("w", "toggle-whole-word");
    config.bind("x", "toggle-regex");

    // Quit
    config.bind("q", "exit");
    config.bind("Esc", "exit");
    config.bind("^C", "exit");

    // =========================================================================
    // SETTINGS
    // =========================================================================
    // Playback cadence, one step per interval
    config.set("sorting_interval_ms", 1000i64);
    config.set("searching_interval_ms", 1200i64);

    // Search defaults (CLI flags turn these on per run)
    config.set("search_case_sensitive", false);
    config.set("search_whole_word", false);
    config.set("search_use_regex", false);

    // Width of the longest bar in the visualizer, in cells
    config.set("bar_width", 40i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::visualizer::VisualizationKind;
    use std::time::Duration;

    #[test]
    fn test_defaults_installed() {
        let mut config = Config::default();
        configure(&mut config);
        assert_eq!(config.command_for("Space"), Some("viz-toggle-play"));
        assert_eq!(config.command_for("/"), Some("search"));
        assert_eq!(
            config.interval_for(VisualizationKind::Sorting),
            Duration::from_millis(1000)
        );
        assert!(!config.search_options().use_regex);
    }
}
