use std::io;
use std::sync::Arc;

use tally_core::{CountingScheme, Effect, ModelRegistry, Msg, SessionError, TokenTally};
use tally_engine::{
    CalculationError, CounterKind, EngineEvent, EngineHandle, TiktokenSource, TokenCalculator,
};
use tally_logging::{tally_info, tally_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(registry: &ModelRegistry) -> io::Result<Self> {
        let calculator = TokenCalculator::from_bindings(
            Arc::new(TiktokenSource::new()),
            registry
                .options()
                .iter()
                .map(|option| (option.value, map_scheme(option.scheme))),
        );
        Ok(Self {
            engine: EngineHandle::new(calculator)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReadFile { request, path } => {
                    tally_info!("ReadFile request={} path={:?}", request, path);
                    self.engine.read_file(request, path);
                }
                Effect::CountTokens {
                    request,
                    text,
                    model_key,
                } => {
                    tally_info!(
                        "CountTokens request={} model={} bytes={}",
                        request,
                        model_key,
                        text.len()
                    );
                    self.engine.count(request, text, model_key);
                }
            }
        }
    }

    /// Messages for every engine event that has arrived so far.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_scheme(scheme: CountingScheme) -> CounterKind {
    match scheme {
        CountingScheme::Bpe(encoding) => CounterKind::Bpe(encoding.to_string()),
        CountingScheme::Heuristic => CounterKind::CharRatio,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FileRead { request, result } => Msg::FileLoaded {
            request,
            result: result
                .map(|loaded| {
                    tally_info!(
                        "Loaded {:?} for request {}: {} bytes, {}",
                        loaded.path,
                        request,
                        loaded.byte_len,
                        loaded.encoding_label
                    );
                    loaded.text
                })
                .map_err(|err| {
                    tally_warn!("Read for request {} failed: {}", request, err);
                    err.to_string()
                }),
        },
        EngineEvent::Counted { request, result } => Msg::CountFinished {
            request,
            result: result
                .map(|count| TokenTally {
                    count: count.count,
                    is_estimate: count.is_estimate,
                })
                .map_err(map_calculation_error),
        },
    }
}

fn map_calculation_error(err: CalculationError) -> SessionError {
    match err {
        CalculationError::UnsupportedModel(key) => SessionError::UnsupportedModel { key },
        CalculationError::Tokenizer(cause) => {
            tally_warn!("Tokenizer failed: {}", cause);
            SessionError::Tokenization
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use tally_engine::{IntakeError, LoadedFile, TokenCount, TokenizerError};

    use super::*;

    #[test]
    fn file_read_maps_to_text_or_message() {
        let ok = map_event(EngineEvent::FileRead {
            request: 3,
            result: Ok(LoadedFile {
                path: PathBuf::from("/tmp/a.txt"),
                text: "abc".into(),
                encoding_label: "UTF-8".into(),
                byte_len: 3,
            }),
        });
        assert_eq!(
            ok,
            Msg::FileLoaded {
                request: 3,
                result: Ok("abc".into())
            }
        );

        let err = map_event(EngineEvent::FileRead {
            request: 4,
            result: Err(IntakeError::Io {
                kind: ErrorKind::PermissionDenied,
                message: "permission denied".into(),
            }),
        });
        assert_eq!(
            err,
            Msg::FileLoaded {
                request: 4,
                result: Err("permission denied".into())
            }
        );
    }

    #[test]
    fn count_errors_map_to_session_errors() {
        let unsupported = map_event(EngineEvent::Counted {
            request: 1,
            result: Err(CalculationError::UnsupportedModel("x".into())),
        });
        assert_eq!(
            unsupported,
            Msg::CountFinished {
                request: 1,
                result: Err(SessionError::UnsupportedModel { key: "x".into() })
            }
        );

        let broken = map_event(EngineEvent::Counted {
            request: 2,
            result: Err(CalculationError::Tokenizer(TokenizerError::Encode(
                "bad".into(),
            ))),
        });
        assert_eq!(
            broken,
            Msg::CountFinished {
                request: 2,
                result: Err(SessionError::Tokenization)
            }
        );
    }

    #[test]
    fn counts_keep_estimate_flag() {
        let msg = map_event(EngineEvent::Counted {
            request: 9,
            result: Ok(TokenCount {
                count: 12,
                is_estimate: true,
            }),
        });
        assert_eq!(
            msg,
            Msg::CountFinished {
                request: 9,
                result: Ok(TokenTally::estimate(12))
            }
        );
    }

    #[test]
    fn every_registry_row_gets_a_counter() {
        let registry = ModelRegistry::builtin();
        for option in registry.options() {
            let kind = map_scheme(option.scheme);
            assert_eq!(
                matches!(kind, CounterKind::Bpe(_)),
                option.scheme.is_exact(),
                "{}",
                option.value
            );
        }
    }
}
