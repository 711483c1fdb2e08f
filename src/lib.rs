//! # charsetconv - Staged Charset Conversion
//!
//! Streaming conversion of text between character encodings. Bytes are
//! decoded from the source charset into UTF-8 and encoded again into the
//! destination charset, in a single pass over the input.
//!
//! ## Features
//!
//! - **Streaming pipeline** of chained [`TransformReader`]s over any [`std::io::Read`]
//! - **Optional staging**: output goes through a temporary file, so the
//!   sink is never left holding a partial result
//! - **IANA charset names** and aliases, plus caller-registered aliases
//! - **Enterprise code pages**: EBCDIC (037, 1047, 1140) and DOS (437, 850,
//!   852, 855, 858, 860, 862, 863, 865) alongside the `encoding_rs` set
//! - **Strict errors**: malformed input and unmappable characters fail the
//!   conversion instead of being replaced
//!
//! ## Quick Start
//!
//! ```rust
//! use charsetconv::{CharsetRegistry, convert_to, decode_to_string, encode_string};
//!
//! let registry = CharsetRegistry::new();
//!
//! let gbk = encode_string(&registry, "你好", "GBK").unwrap();
//! assert_eq!(gbk, [0xC4, 0xE3, 0xBA, 0xC3]);
//!
//! let big5 = convert_to(&registry, &gbk, "GBK", "Big5").unwrap();
//! assert_eq!(decode_to_string(&registry, &big5, "Big5").unwrap(), "你好");
//! ```
//!
//! ## Staging
//!
//! ```rust
//! use charsetconv::{CharsetRegistry, encode_with};
//!
//! let registry = CharsetRegistry::new();
//! let mut out = Vec::new();
//!
//! // '你' has no windows-1252 form; with staging nothing reaches `out`
//! let err = encode_with(&registry, "abc你".as_bytes(), &mut out, "windows-1252", true);
//! assert!(err.is_err());
//! assert!(out.is_empty());
//! ```

#![deny(missing_docs)]

mod charset;
mod codec;
mod codepage;
mod convert;
mod error;
mod multibyte;
mod pipeline;
mod singlebyte;
mod tables;
mod transform;

pub use charset::{Charset, CharsetRegistry};
pub use codec::{Codec, CodecProvider, IanaIndex, Resolver, TransformFactory, resolve_codec};
pub use convert::{
    convert, convert_to, convert_with, decode, decode_to_string, decode_with, encode,
    encode_string, encode_with,
};
pub use error::{Error, Result, TransformError};
pub use pipeline::{STAGE_BUFFER_SIZE, STAGING_PREFIX, TransformReader, apply_transform, relay};
pub use transform::{Transform, TransformStatus};
