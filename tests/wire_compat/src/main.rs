fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

// The browser client shipped on the upload page parses these JSON
// shapes directly. The fixtures are the contract: changing a field
// name or dropping a key breaks deployed pages, so every change has
// to show up here first.
#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use filedrop_protocol::{ErrorResponse, UploadCompletedEvent, UploadResponse};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
    }

    // --- Wire type tests ---

    #[test]
    fn fixture_upload_completed_event() {
        roundtrip_test::<UploadCompletedEvent>("upload_completed_event.json");
    }

    #[test]
    fn fixture_upload_response() {
        roundtrip_test::<UploadResponse>("upload_response.json");
    }

    #[test]
    fn fixture_error_response() {
        roundtrip_test::<ErrorResponse>("error_response.json");
    }

    // --- Browser contract ---

    #[test]
    fn event_carries_exactly_the_keys_the_page_reads() {
        // The upload page gates on `data.file_name` and
        // `data.file_size`, and nothing else.
        let fixture = load_fixture("upload_completed_event.json");
        let keys: Vec<&str> = fixture
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["file_name", "file_size"]);
    }

    #[test]
    fn event_serializes_from_rust_to_the_fixture_shape() {
        let event = UploadCompletedEvent::new("report_final.csv", 10);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, load_fixture("upload_completed_event.json"));
    }
}
