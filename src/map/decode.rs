use std::io::Read;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::*;
use flate2::read::{GzDecoder, ZlibDecoder};
use tracing::instrument;
use super::{Compression, Encoding, Gid, Layer};

impl Layer {

    /// Decodes and decompresses the layer's data into raw gids, row-major.
    /// The result always holds exactly `width * height` gids.
    #[instrument(skip_all, fields(layer = %self.name))]
    pub fn decode(&self) -> Result<Vec<Gid>, DecodeError> {
        let expected_len = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|cells| cells.checked_mul(4))
            .ok_or(DecodeError::LayerTooLarge { width: self.width, height: self.height })?;
        let bytes = self.decode_bytes(expected_len)?;
        if bytes.len() != expected_len {
            return Err(DecodeError::InvalidDecodedLength { expected: expected_len, actual: bytes.len() });
        }

        let width = self.width as usize;
        let mut gids = vec![Gid::EMPTY; width * self.height as usize];
        let mut chunks = bytes.chunks_exact(4);
        for y in 0..self.height as usize {
            for x in 0..width {
                let Some(chunk) = chunks.next() else { break };
                gids[y*width + x] = Gid(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
            }
        }
        Ok(gids)
    }

    /// Undoes the text encoding and compression of the payload.
    /// Reads at most one byte past `limit` so oversized streams are caught without inflating them fully.
    fn decode_bytes(&self, limit: usize) -> Result<Vec<u8>, DecodeError> {
        let data = &self.data;
        if data.encoding != Encoding::Base64 {
            return Err(DecodeError::UnsupportedEncoding { encoding: data.encoding.to_string() });
        }
        match data.compression {
            Compression::Gzip | Compression::Zlib => {},
            _ => return Err(DecodeError::UnsupportedCompression { compression: data.compression.to_string() }),
        }

        // Line breaks inside the payload are tolerated, other whitespace only around it
        let text: Vec<u8> = data.payload
            .trim()
            .bytes()
            .filter(|byte| *byte != b'\r' && *byte != b'\n')
            .collect();
        let compressed = STANDARD.decode(text)?;

        let take = limit as u64 + 1;
        let mut out = Vec::new();
        match data.compression {
            Compression::Gzip => GzDecoder::new(compressed.as_slice()).take(take).read_to_end(&mut out)?,
            _ => ZlibDecoder::new(compressed.as_slice()).take(take).read_to_end(&mut out)?,
        };
        Ok(out)
    }
}

/// Reasons a tile layer can fail to decode.
#[derive(Error, Display, From, Debug)]
pub enum DecodeError {
    #[display(fmt="Unsupported layer encoding '{}'", encoding)]
    #[from(ignore)]
    UnsupportedEncoding { encoding: String },
    #[display(fmt="Unsupported layer compression '{}'", compression)]
    #[from(ignore)]
    UnsupportedCompression { compression: String },
    #[display(fmt="Invalid decoded data length: expected {} bytes, got {}", expected, actual)]
    #[from(ignore)]
    InvalidDecodedLength { expected: usize, actual: usize },
    #[display(fmt="Layer of {}x{} tiles is too large to decode", width, height)]
    #[from(ignore)]
    LayerTooLarge { width: u32, height: u32 },
    #[display(fmt="Invalid GID {}", gid)]
    #[from(ignore)]
    InvalidGid { gid: Gid },
    #[display(fmt="{}", _0)]
    Base64Error(base64::DecodeError),
    #[display(fmt="{}", _0)]
    StreamError(std::io::Error),
}
