//! File Encoder
//!
//! Reads a selected file into a base64 payload suitable for a single-unit
//! remote store call, reporting byte-read progress along the way.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use uplink_core::{EncodeError, EncodeResult};

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Enforce the per-file size ceiling before any read begins.
pub fn check_size(size: u64, max: u64) -> EncodeResult<()> {
    if size > max {
        return Err(EncodeError::SizeLimitExceeded { size, max });
    }
    Ok(())
}

/// Read `reader` to the end and base64-encode its contents.
///
/// `on_progress` receives integer percentages (0-100) computed from bytes
/// read against `total_size`. Reports are monotone non-decreasing and
/// deduplicated; a zero-byte file still gets a single 100% report so its
/// entry does not sit at 0 after a successful upload.
pub async fn encode_base64<R, F>(
    mut reader: R,
    total_size: u64,
    mut on_progress: F,
) -> EncodeResult<String>
where
    R: AsyncRead + Unpin + Send,
    F: FnMut(u8),
{
    let mut raw = Vec::with_capacity(total_size.min(READ_CHUNK_SIZE as u64) as usize);
    let mut buffer = [0u8; READ_CHUNK_SIZE];
    let mut last_reported: Option<u8> = None;

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buffer[..n]);

        let percent = progress_percent(raw.len() as u64, total_size);
        if last_reported.map_or(true, |last| percent > last) {
            trace!(percent, bytes = raw.len(), "encode progress");
            on_progress(percent);
            last_reported = Some(percent);
        }
    }

    if last_reported.map_or(true, |last| last < 100) {
        on_progress(100);
    }

    Ok(STANDARD.encode(&raw))
}

fn progress_percent(read: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    // Reads may overshoot a stale declared size; clamp instead of wrapping.
    ((read.min(total) as u128 * 100) / total as u128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encodes_to_standard_base64() {
        let data = b"hello world";
        let payload = encode_base64(&data[..], data.len() as u64, |_| {})
            .await
            .unwrap();
        assert_eq!(payload, "aGVsbG8gd29ybGQ=");
    }

    #[tokio::test]
    async fn test_progress_is_monotone_and_ends_at_100() {
        let data = vec![0u8; 200 * 1024];
        let mut reports = Vec::new();
        encode_base64(&data[..], data.len() as u64, |p| reports.push(p))
            .await
            .unwrap();

        assert!(reports.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*reports.last().unwrap(), 100);
    }

    #[tokio::test]
    async fn test_zero_byte_file_reports_completion() {
        let mut reports = Vec::new();
        let payload = encode_base64(&b""[..], 0, |p| reports.push(p)).await.unwrap();
        assert_eq!(payload, "");
        assert_eq!(reports, vec![100]);
    }

    #[tokio::test]
    async fn test_read_error_propagates() {
        struct BrokenReader;
        impl tokio::io::AsyncRead for BrokenReader {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Ready(Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device unplugged",
                )))
            }
        }

        let result = encode_base64(BrokenReader, 10, |_| {}).await;
        assert!(matches!(result, Err(EncodeError::Read(_))));
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(100, 200).is_ok());
        assert!(check_size(200, 200).is_ok());
        let err = check_size(201, 200).unwrap_err();
        assert!(matches!(err, EncodeError::SizeLimitExceeded { size: 201, max: 200 }));
    }
}
