use chrono::Utc;
use uuid::Uuid;

use crate::{StorageError, StorageResult};

/// Turns original filenames into backend-safe stored names and back.
///
/// Implementations must be pure and stateless: for every filename `f` that
/// `generate` accepts, `restore(&generate(f)?)? == f`.
pub trait FilenameCodec: Send + Sync {
    /// Derive a fresh, unique stored name from an original filename
    fn generate(&self, original: &str) -> StorageResult<String>;

    /// Recover the original filename from a stored name
    fn restore(&self, stored: &str) -> StorageResult<String>;
}

/// Default codec: `markers + token + '-' + body`.
///
/// A filename splits into a leading run of `'.'` and `'-'` marker characters
/// and the body (base name plus the complete extension chain). The token is
/// the current UTC time in milliseconds followed by a UUIDv4 in simple form,
/// so every token character is an ASCII hex digit and the `'-'` terminating
/// the token is unambiguous. The marker run stays at the front of the stored
/// name and the body is carried verbatim behind the token.
#[derive(Debug, Clone, Default)]
pub struct DefaultFilenameCodec;

impl DefaultFilenameCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Split off the leading run of marker characters. Operates on char
/// boundaries, so multi-byte filenames pass through untouched.
fn split_markers(name: &str) -> (&str, &str) {
    let body_start = name.find(|c| c != '.' && c != '-').unwrap_or(name.len());
    name.split_at(body_start)
}

impl FilenameCodec for DefaultFilenameCodec {
    fn generate(&self, original: &str) -> StorageResult<String> {
        let (markers, body) = split_markers(original);
        if body.is_empty() {
            return Err(StorageError::invalid_name(original));
        }

        let token = format!("{}{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple());
        Ok(format!("{}{}-{}", markers, token, body))
    }

    fn restore(&self, stored: &str) -> StorageResult<String> {
        let (markers, tail) = split_markers(stored);
        let delimiter = tail
            .find('-')
            .ok_or_else(|| StorageError::invalid_name(stored))?;

        let token = &tail[..delimiter];
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StorageError::invalid_name(stored));
        }

        let body = &tail[delimiter + 1..];
        if body.is_empty() {
            return Err(StorageError::invalid_name(stored));
        }

        Ok(format!("{}{}", markers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TRIP_NAMES: [&str; 9] = [
        "test1234.png",
        "test-1234.png",
        "test-1234.bak.png",
        ".test1234.png",
        ".test-1234.png",
        ".test-1234.bak.png",
        "-test1234.png",
        "-test-1234.png",
        "-test-1234.bak.png",
    ];

    #[test]
    fn round_trip_preserves_original_names() {
        let codec = DefaultFilenameCodec::new();

        for name in ROUND_TRIP_NAMES {
            let stored = codec.generate(name).unwrap();
            let restored = codec.restore(&stored).unwrap();
            assert_eq!(restored, name, "round trip failed for {}", name);
        }
    }

    #[test]
    fn round_trip_without_extension() {
        let codec = DefaultFilenameCodec::new();

        for name in ["README", ".gitignore", "archive.tar.gz"] {
            let stored = codec.generate(name).unwrap();
            assert_eq!(codec.restore(&stored).unwrap(), name);
        }
    }

    #[test]
    fn round_trip_non_ascii_names() {
        let codec = DefaultFilenameCodec::new();

        for name in ["résumé.pdf", ".日記-2024.bak.txt", "-написано.md"] {
            let stored = codec.generate(name).unwrap();
            assert_eq!(codec.restore(&stored).unwrap(), name);
        }
    }

    #[test]
    fn generated_names_differ_per_call() {
        let codec = DefaultFilenameCodec::new();

        let first = codec.generate("a.png").unwrap();
        let second = codec.generate("a.png").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn generated_name_embeds_body_and_differs_from_original() {
        let codec = DefaultFilenameCodec::new();

        let stored = codec.generate("test-1234.png").unwrap();
        assert!(stored.contains("test-1234.png"));
        assert_ne!(stored, "test-1234.png");
    }

    #[test]
    fn generated_name_keeps_leading_markers() {
        let codec = DefaultFilenameCodec::new();

        let stored = codec.generate(".profile").unwrap();
        assert!(stored.starts_with('.'));

        let stored = codec.generate("-dashed.txt").unwrap();
        assert!(stored.starts_with('-'));
    }

    #[test]
    fn generate_rejects_marker_only_names() {
        let codec = DefaultFilenameCodec::new();

        for name in ["", ".", "-", "--", ".-."] {
            let err = codec.generate(name).unwrap_err();
            assert!(matches!(err, StorageError::InvalidName { .. }), "accepted {:?}", name);
        }
    }

    #[test]
    fn restore_rejects_names_without_a_token() {
        let codec = DefaultFilenameCodec::new();

        for stored in ["plainfile.png", "nonexistent-key", "x-y", ""] {
            let err = codec.restore(stored).unwrap_err();
            assert!(matches!(err, StorageError::InvalidName { .. }), "accepted {:?}", stored);
        }
    }
}
