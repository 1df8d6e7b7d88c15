use serde::Serialize;

/// Counters reported after a completed indexing run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IndexStats {
    /// Number of registered documents.
    pub num_files: usize,
    /// Number of distinct definitions: global defs plus per-document local defs.
    pub num_defs: usize,
    /// Number of LSIF records written, as counted by the emitter.
    pub num_elements: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_with_snake_case_keys() {
        let stats = IndexStats {
            num_files: 2,
            num_defs: 5,
            num_elements: 40,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["num_files"], 2);
        assert_eq!(value["num_defs"], 5);
        assert_eq!(value["num_elements"], 40);
    }
}
