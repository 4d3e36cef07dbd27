use super::types::{non_empty, Config};

/// Apply `SUBISSUE_*` variables. `lookup` is `std::env::var` outside tests.
pub(super) fn apply_env<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SUBISSUE_REPO") {
        config.repo = non_empty(&val);
    }
    if let Some(val) = lookup("SUBISSUE_GH") {
        if let Some(cli) = non_empty(&val) {
            config.tracker_cli = cli;
        }
    }
    if let Some(val) = lookup("SUBISSUE_LABELS") {
        let labels: Vec<String> = val
            .split(',')
            .filter_map(non_empty)
            .collect();
        if !labels.is_empty() {
            config.labels = labels;
        }
    }
    if let Some(val) = lookup("SUBISSUE_LOG_FILE") {
        config.log_file = non_empty(&val);
    }
    if let Some(val) = lookup("SUBISSUE_DRY_RUN") {
        config.dry_run = val == "true" || val == "1";
    }
}
