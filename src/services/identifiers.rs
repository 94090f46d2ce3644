//! Human-friendly unique identifiers: usernames and list sharing slugs.
//!
//! Candidates are sampled from a small fixed vocabulary (usernames) or a
//! 36-symbol alphabet (slugs) and checked against the store before use. The
//! unique indexes on `users.username` and `todolists.slug` remain the final
//! authority; callers treat a duplicate insert as one more collision.

use async_trait::async_trait;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::IdentifierConfig;
use crate::db::Store;

pub const ADJECTIVES: [&str; 10] = [
    "bright", "calm", "cool", "dark", "fast", "happy", "kind", "lucky", "quick", "shiny",
];

pub const NOUNS: [&str; 10] = [
    "cat", "dog", "fox", "lion", "panda", "tiger", "wolf", "zebra", "whale", "koala",
];

const SLUG_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SLUG_SEGMENTS: [usize; 3] = [3, 4, 3];

/// `adjective-noun-N` with N uniform in 0..=99, e.g. `bright-fox-42`.
pub fn username_candidate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number: u8 = rng.random_range(0..100);
    format!("{adjective}-{noun}-{number}")
}

/// Three dash-separated `[a-z0-9]` segments of lengths 3, 4, 3, e.g. `a1c-9f3d-k2p`.
pub fn slug_candidate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = SLUG_SEGMENTS.iter().sum::<usize>() + SLUG_SEGMENTS.len() - 1;
    let mut slug = String::with_capacity(len);

    for (i, segment) in SLUG_SEGMENTS.iter().enumerate() {
        if i > 0 {
            slug.push('-');
        }
        for _ in 0..*segment {
            let idx = rng.random_range(0..SLUG_CHARSET.len());
            slug.push(char::from(SLUG_CHARSET[idx]));
        }
    }

    slug
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Username,
    Slug,
}

impl IdentifierKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Slug => "slug",
        }
    }

    fn candidate<R: Rng + ?Sized>(self, rng: &mut R) -> String {
        match self {
            Self::Username => username_candidate(rng),
            Self::Slug => slug_candidate(rng),
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("could not check {kind} uniqueness: {failures} store errors, last: {last_error}")]
    StoreUnavailable {
        kind: IdentifierKind,
        failures: u32,
        last_error: String,
    },
}

/// Bounds on store failures in the generate-check-retry loop. Collisions are
/// not bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierPolicy {
    pub max_store_errors: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for IdentifierPolicy {
    fn default() -> Self {
        Self::from(&IdentifierConfig::default())
    }
}

impl From<&IdentifierConfig> for IdentifierPolicy {
    fn from(config: &IdentifierConfig) -> Self {
        Self {
            max_store_errors: config.max_store_errors.max(1),
            backoff_base: config.backoff_base(),
            backoff_max: config.backoff_max(),
        }
    }
}

/// Existence check against the column an identifier must be unique in.
#[async_trait]
pub trait IdentifierLookup: Send + Sync {
    async fn is_taken(&self, kind: IdentifierKind, candidate: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl IdentifierLookup for Store {
    async fn is_taken(&self, kind: IdentifierKind, candidate: &str) -> anyhow::Result<bool> {
        match kind {
            IdentifierKind::Username => self.username_exists(candidate).await,
            IdentifierKind::Slug => self.slug_exists(candidate).await,
        }
    }
}

#[derive(Clone)]
pub struct IdentifierGenerator {
    lookup: Arc<dyn IdentifierLookup>,
    policy: IdentifierPolicy,
}

impl IdentifierGenerator {
    #[must_use]
    pub fn new(lookup: Arc<dyn IdentifierLookup>, policy: IdentifierPolicy) -> Self {
        Self { lookup, policy }
    }

    pub async fn generate_username(&self) -> Result<String, IdentifierError> {
        self.generate(IdentifierKind::Username).await
    }

    pub async fn generate_todolist_slug(&self) -> Result<String, IdentifierError> {
        self.generate(IdentifierKind::Slug).await
    }

    /// Sample candidates until one is absent from the store.
    ///
    /// A collision resamples immediately and never gives up. A store error is
    /// logged and retried after an exponential backoff; after
    /// `max_store_errors` of them the lookup is abandoned.
    pub async fn generate(&self, kind: IdentifierKind) -> Result<String, IdentifierError> {
        let mut backoff = self.policy.backoff_base;
        let mut failures = 0;
        let mut collisions: u64 = 0;

        loop {
            let candidate = {
                let mut rng = rand::rng();
                kind.candidate(&mut rng)
            };

            match self.lookup.is_taken(kind, &candidate).await {
                Ok(false) => {
                    if collisions > 0 {
                        debug!(%kind, collisions, "Found free identifier after collisions");
                    }
                    return Ok(candidate);
                }
                Ok(true) => {
                    collisions += 1;
                    debug!(%kind, candidate = %candidate, collisions, "Identifier collision, resampling");
                    record_collision(kind);
                }
                Err(e) => {
                    failures += 1;
                    let message = format!("{e:#}");
                    warn!(%kind, failures, error = %message, "Failed to check identifier uniqueness");

                    if failures >= self.policy.max_store_errors {
                        return Err(IdentifierError::StoreUnavailable {
                            kind,
                            failures,
                            last_error: message,
                        });
                    }

                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(self.policy.backoff_max);
                }
            }
        }
    }
}

pub(crate) fn record_collision(kind: IdentifierKind) {
    metrics::counter!("identifier_collisions_total", "kind" => kind.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedLookup {
        answers: Mutex<VecDeque<anyhow::Result<bool>>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedLookup {
        fn new(answers: Vec<anyhow::Result<bool>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl IdentifierLookup for ScriptedLookup {
        async fn is_taken(&self, _kind: IdentifierKind, candidate: &str) -> anyhow::Result<bool> {
            self.seen.lock().unwrap().push(candidate.to_string());
            self.answers.lock().unwrap().pop_front().unwrap_or(Ok(false))
        }
    }

    fn fast_policy(max_store_errors: u32) -> IdentifierPolicy {
        IdentifierPolicy {
            max_store_errors,
            backoff_base: Duration::from_millis(1),
            backoff_max: Duration::from_millis(2),
        }
    }

    #[test]
    fn username_candidate_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let name = username_candidate(&mut rng);
            let parts: Vec<&str> = name.split('-').collect();
            assert_eq!(parts.len(), 3, "{name}");
            assert!(ADJECTIVES.contains(&parts[0]), "{name}");
            assert!(NOUNS.contains(&parts[1]), "{name}");
            let n: u32 = parts[2].parse().unwrap();
            assert!(n < 100, "{name}");
        }
    }

    #[test]
    fn slug_candidate_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let slug = slug_candidate(&mut rng);
            assert_eq!(slug.len(), 12, "{slug}");
            let lens: Vec<usize> = slug.split('-').map(str::len).collect();
            assert_eq!(lens, vec![3, 4, 3], "{slug}");
            assert!(
                slug.chars()
                    .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()),
                "{slug}"
            );
        }
    }

    #[test]
    fn seeded_candidates_are_reproducible() {
        let a = slug_candidate(&mut StdRng::seed_from_u64(1));
        let b = slug_candidate(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn returns_first_free_candidate() {
        let lookup = ScriptedLookup::new(vec![Ok(true), Ok(true), Ok(false)]);
        let generator = IdentifierGenerator::new(lookup.clone(), fast_policy(5));

        let name = generator.generate_username().await.unwrap();

        let seen = lookup.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.last().unwrap(), &name);
    }

    #[tokio::test]
    async fn store_errors_are_retried() {
        let lookup = ScriptedLookup::new(vec![
            Err(anyhow::anyhow!("database is locked")),
            Ok(false),
        ]);
        let generator = IdentifierGenerator::new(lookup.clone(), fast_policy(3));

        let slug = generator.generate_todolist_slug().await.unwrap();
        assert_eq!(slug.len(), 12);
        assert_eq!(lookup.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn long_collision_runs_still_succeed() {
        let mut answers: Vec<anyhow::Result<bool>> = (0..200).map(|_| Ok(true)).collect();
        answers.push(Ok(false));
        let lookup = ScriptedLookup::new(answers);
        let generator = IdentifierGenerator::new(lookup.clone(), fast_policy(2));

        let name = generator.generate_username().await.unwrap();

        let seen = lookup.seen.lock().unwrap();
        assert_eq!(seen.len(), 201);
        assert_eq!(seen.last().unwrap(), &name);
    }

    #[tokio::test]
    async fn collisions_do_not_count_as_store_errors() {
        let mut answers: Vec<anyhow::Result<bool>> = vec![Err(anyhow::anyhow!("busy"))];
        answers.extend((0..50).map(|_| Ok(true)));
        answers.push(Err(anyhow::anyhow!("busy")));
        answers.extend((0..50).map(|_| Ok(true)));
        answers.push(Ok(false));
        let lookup = ScriptedLookup::new(answers);
        let generator = IdentifierGenerator::new(lookup.clone(), fast_policy(3));

        let slug = generator.generate_todolist_slug().await.unwrap();
        assert_eq!(slug.len(), 12);
        assert_eq!(lookup.seen.lock().unwrap().len(), 103);
    }

    #[tokio::test]
    async fn gives_up_after_max_store_errors() {
        let lookup = ScriptedLookup::new(
            (0..3)
                .map(|_| Err(anyhow::anyhow!("connection refused")))
                .collect(),
        );
        let generator = IdentifierGenerator::new(lookup.clone(), fast_policy(3));

        let err = generator.generate_todolist_slug().await.unwrap_err();
        let IdentifierError::StoreUnavailable {
            kind,
            failures,
            ref last_error,
        } = err;
        assert_eq!(kind, IdentifierKind::Slug);
        assert_eq!(failures, 3);
        assert_eq!(last_error, "connection refused");
        assert!(err.to_string().contains("3 store errors"), "{err}");
        assert_eq!(lookup.seen.lock().unwrap().len(), 3);
    }
}
