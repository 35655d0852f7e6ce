use anyhow::Context;
use tokio::task::spawn_blocking;

/// Runs on the blocking thread pool
pub async fn hash_password(password: String, cost: u32) -> Result<String, anyhow::Error> {
    spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("hash_password task")?
        .context("bcrypt::hash")
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, anyhow::Error> {
    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("verify_password task")?
        .context("bcrypt::verify")
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("hunter22".to_string(), 4).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_cost_is_an_error() {
        assert!(hash_password("hunter22".to_string(), 2).await.is_err());
    }
}
