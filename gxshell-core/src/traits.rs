//! Common traits for gxshell.
//!
//! These traits define the seams that different implementations can satisfy,
//! enabling modularity and testing.

use std::path::Path;

use async_trait::async_trait;

// ═══════════════════════════════════════════════════════════════════════════════
// API FILE READER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for reading the node's `api` file.
///
/// Implementations might use:
/// - The local filesystem (production)
/// - Fixed contents or a call-recording spy (tests)
#[async_trait]
pub trait ApiFileReader: Send + Sync {
    /// Reads the whole file at `path` as raw bytes.
    async fn read_api_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static [u8]);

    #[async_trait]
    impl ApiFileReader for Fixed {
        async fn read_api_file(&self, _path: &Path) -> std::io::Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    #[tokio::test]
    async fn test_reader_as_trait_object() {
        let reader: Box<dyn ApiFileReader> = Box::new(Fixed(b"/ip4/127.0.0.1/tcp/5001"));
        let data = reader.read_api_file(Path::new("api")).await.unwrap();
        assert_eq!(data, b"/ip4/127.0.0.1/tcp/5001");
    }
}
