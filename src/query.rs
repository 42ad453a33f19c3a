// Page options carried in the URL query string.

/// Query-string flags: `seed=<u64>` and `debug-path`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub seed: Option<u64>,
    pub debug_path: bool,
}

/// Parse `location.search`, with or without the leading `?`.
/// Unknown keys are ignored; a seed that is not a `u64` is treated as absent.
pub fn parse_query(search: &str) -> PageOptions {
    let mut opts = PageOptions::default();
    for pair in search.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "seed" => opts.seed = value.parse().ok(),
            "debug-path" => opts.debug_path = true,
            _ => {}
        }
    }
    opts
}
