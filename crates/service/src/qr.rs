//! QR code generation for arbitrary URLs. Independent of the contact store.

use std::sync::Arc;

use qrcode::render::svg;
use qrcode::QrCode;
use tracing::{debug, warn};

use crate::errors::ServiceError;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Pixel size and quiet zone requested from the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for QrOptions {
    fn default() -> Self { Self { width: 300, height: 300, margin: 0 } }
}

/// Turns text into SVG markup. Errors carry the encoder's own message.
pub trait QrEncoder: Send + Sync {
    fn encode_svg(&self, data: &str, options: QrOptions) -> Result<String, String>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgQrEncoder;

impl QrEncoder for SvgQrEncoder {
    fn encode_svg(&self, data: &str, options: QrOptions) -> Result<String, String> {
        let code = QrCode::new(data.as_bytes()).map_err(|e| e.to_string())?;
        let mut renderer = code.render::<svg::Color>();
        // quiet zone first: min_dimensions sizes modules for the current zone setting
        renderer
            .quiet_zone(options.margin > 0)
            .min_dimensions(options.width, options.height);
        Ok(renderer.build())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

pub struct QrService {
    encoder: Arc<dyn QrEncoder>,
    options: QrOptions,
}

impl QrService {
    pub fn new(encoder: Arc<dyn QrEncoder>, options: QrOptions) -> Self { Self { encoder, options } }

    pub fn options(&self) -> QrOptions { self.options }

    /// Encode `url` as an SVG QR symbol.
    ///
    /// # Examples
    /// ```
    /// use service::qr::QrService;
    /// let svc = QrService::default();
    /// let image = svc.generate("https://example.com").unwrap();
    /// assert!(String::from_utf8(image.bytes).unwrap().contains("<svg"));
    /// assert!(svc.generate("  ").is_err());
    /// ```
    pub fn generate(&self, url: &str) -> Result<QrImage, ServiceError> {
        if url.trim().is_empty() {
            return Err(ServiceError::BadRequest("The URL parameter is required.".into()));
        }
        let markup = self.encoder.encode_svg(url, self.options).map_err(|msg| {
            warn!(error = %msg, "qr encoding failed");
            ServiceError::Encoding(msg)
        })?;
        debug!(len = markup.len(), "qr code generated");
        Ok(QrImage { bytes: markup.into_bytes(), content_type: SVG_CONTENT_TYPE })
    }
}

impl Default for QrService {
    fn default() -> Self { Self::new(Arc::new(SvgQrEncoder), QrOptions::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEncoder;

    impl QrEncoder for FailingEncoder {
        fn encode_svg(&self, _data: &str, _options: QrOptions) -> Result<String, String> {
            Err("boom".into())
        }
    }

    #[test]
    fn blank_urls_are_bad_requests() {
        let svc = QrService::default();
        for url in ["", "   ", "\t\n"] {
            assert_eq!(
                svc.generate(url),
                Err(ServiceError::BadRequest("The URL parameter is required.".into()))
            );
        }
    }

    #[test]
    fn generates_svg_markup() {
        let image = QrService::default().generate("https://example.com").unwrap();
        assert_eq!(image.content_type, "image/svg+xml");
        let text = String::from_utf8(image.bytes).unwrap();
        assert!(text.contains("<svg"));
    }

    fn svg_width(markup: &str) -> u32 {
        markup
            .split("width=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .and_then(|w| w.parse().ok())
            .unwrap()
    }

    #[test]
    fn respects_minimum_dimensions() {
        let markup = SvgQrEncoder
            .encode_svg("https://example.com", QrOptions::default())
            .unwrap();
        let width = svg_width(&markup);
        assert!(width >= 300, "svg width {width} below requested minimum");
    }

    #[test]
    fn margin_enables_quiet_zone_and_keeps_minimum() {
        let bare = SvgQrEncoder
            .encode_svg("https://example.com", QrOptions::default())
            .unwrap();
        let padded = SvgQrEncoder
            .encode_svg("https://example.com", QrOptions { margin: 4, ..QrOptions::default() })
            .unwrap();
        assert!(svg_width(&padded) >= 300, "padded width {} below minimum", svg_width(&padded));
        assert_ne!(svg_width(&padded), svg_width(&bare));
        assert_ne!(padded, bare);
    }

    #[test]
    fn oversized_payload_surfaces_encoder_message() {
        let url = format!("https://example.com/{}", "a".repeat(5000));
        match QrService::default().generate(&url) {
            Err(ServiceError::Encoding(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected encoding failure, got {other:?}"),
        }
    }

    #[test]
    fn encoder_errors_map_to_encoding_failure() {
        let svc = QrService::new(Arc::new(FailingEncoder), QrOptions::default());
        let err = svc.generate("https://example.com").unwrap_err();
        assert_eq!(err.to_string(), "An error occurred: boom");
    }
}
