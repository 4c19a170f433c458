//! ASN.1 DER encoding for SM2 signatures.
//!
//! ```text
//! SM2Signature ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```

use super::Signature;
use crate::{Error, FIELD_SIZE, FieldBytes, Result};
use alloc::{string::String, vec::Vec};
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::UintRef,
};

impl Signature {
    /// Parse a signature from its ASN.1 DER encoding.
    ///
    /// Fails with [`Error::InvalidSignatureFormat`] when the input is not a
    /// well-formed `SEQUENCE` of two `INTEGER`s or either integer does not
    /// fit in 32 bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let SignatureRef { r, s } =
            SignatureRef::from_der(bytes).map_err(|_| Error::InvalidSignatureFormat)?;
        Ok(Self::from_components(
            left_pad(r.as_bytes())?,
            left_pad(s.as_bytes())?,
        ))
    }

    /// Serialize this signature as ASN.1 DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let sig = SignatureRef {
            r: UintRef::new(self.r_bytes()).map_err(|_| Error::InvalidSignatureFormat)?,
            s: UintRef::new(self.s_bytes()).map_err(|_| Error::InvalidSignatureFormat)?,
        };
        sig.to_der().map_err(|_| Error::InvalidSignatureFormat)
    }

    /// Parse a hex-encoded ASN.1 DER signature.
    pub fn from_der_hex(hex: &str) -> Result<Self> {
        let der = hex::decode(hex).map_err(|_| Error::InvalidSignatureFormat)?;
        Self::from_der(&der)
    }

    /// Lowercase hex encoding of the ASN.1 DER form.
    pub fn to_der_hex(&self) -> Result<String> {
        self.to_der().map(hex::encode)
    }
}

/// Fit a minimal big-endian integer into a fixed 32-byte field.
fn left_pad(bytes: &[u8]) -> Result<FieldBytes> {
    if bytes.len() > FIELD_SIZE {
        return Err(Error::InvalidSignatureFormat);
    }

    let mut out = FieldBytes::default();
    out[FIELD_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}
