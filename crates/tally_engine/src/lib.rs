//! Token tally engine: file intake, tokenizer adapter and effect execution.
mod calculator;
mod decode;
mod engine;
mod intake;
mod token;
mod tokenizer;
mod types;

pub use calculator::{CalculationError, CounterKind, TokenCalculator};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::EngineHandle;
pub use intake::{read_text_file, IntakeError};
pub use token::{BpeTokenCounter, CharRatioTokenCounter, TokenCounter, CHARS_PER_TOKEN};
pub use tokenizer::{EncodingHandle, EncodingSource, TiktokenSource, TokenizerError, SUPPORTED_SCHEMES};
pub use types::{EngineEvent, LoadedFile, RequestId, TokenCount};
