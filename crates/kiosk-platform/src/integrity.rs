use async_trait::async_trait;
use sha2::{Digest, Sha256};

use kiosk_common::PlatformError;

/// The integrity module behind `BROWSER HASH`: digests a caller-supplied
/// message asynchronously and hands the result back for the response path.
#[async_trait]
pub trait IntegrityModule: Send + Sync {
    async fn digest(&self, message: &str) -> Result<String, PlatformError>;
}

/// SHA-256 backed implementation used by the bundled shell.
#[derive(Default)]
pub struct Sha256Integrity;

#[async_trait]
impl IntegrityModule for Sha256Integrity {
    async fn digest(&self, message: &str) -> Result<String, PlatformError> {
        let mut hasher = Sha256::new();
        hasher.update(message.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digest_known_vector() {
        let module = Sha256Integrity;
        let digest = module.digest("abc").await.unwrap();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn digest_is_stable() {
        let module = Sha256Integrity;
        let a = module.digest("payload").await.unwrap();
        let b = module.digest("payload").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
