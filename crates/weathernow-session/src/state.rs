//! Session view-model and its reducer.
//!
//! Every user action and every network completion is an `Event`; `reduce`
//! folds it into the state and says which `Effect` (if any) to start next.
//! Completions carry the generation of the request that produced them and are
//! dropped unless that generation is still current.

use weathernow_core::WeatherError;
use weathernow_lookup::{is_searchable, Place, WeatherSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Typing,
    Suggesting,
    SuggestEmpty,
    Resolving,
    Ready,
    Error,
}

/// What a submit should look up.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Free text, resolved to the geocoder's top match
    Query(String),
    /// A picked suggestion, used as-is
    Place(Place),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QueryChanged(String),
    SuggestionsLoaded {
        generation: u64,
        places: Vec<Place>,
    },
    SuggestionsFailed {
        generation: u64,
        error: WeatherError,
    },
    SuggestionPicked(Place),
    Submitted,
    WeatherLoaded {
        generation: u64,
        summary: WeatherSummary,
    },
    WeatherFailed {
        generation: u64,
        error: WeatherError,
    },
}

/// Work the driver must start on behalf of the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchSuggestions { generation: u64, query: String },
    FetchWeather { generation: u64, target: Target },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    query: String,
    suggestions: Vec<Place>,
    weather: Option<WeatherSummary>,
    loading: bool,
    error: Option<WeatherError>,
    phase: Phase,
    picked: Option<Place>,
    suggest_generation: u64,
    submit_generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Place] {
        &self.suggestions
    }

    pub fn weather(&self) -> Option<&WeatherSummary> {
        self.weather.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&WeatherError> {
        self.error.as_ref()
    }

    /// User-facing text for the current error, if any
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(WeatherError::user_message)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generation a suggestion completion must carry to be accepted
    pub fn suggest_generation(&self) -> u64 {
        self.suggest_generation
    }

    /// Generation a weather completion must carry to be accepted
    pub fn submit_generation(&self) -> u64 {
        self.submit_generation
    }

    fn fail(&mut self, error: WeatherError) {
        self.loading = false;
        self.weather = None;
        self.error = Some(error);
        self.phase = Phase::Error;
    }
}

/// Apply `event` to `state`.
pub fn reduce(mut state: SessionState, event: Event) -> (SessionState, Option<Effect>) {
    let effect = match event {
        Event::QueryChanged(text) => {
            state.query = text;
            state.picked = None;
            state.suggest_generation += 1;
            state.phase = Phase::Typing;

            if is_searchable(&state.query) {
                Some(Effect::FetchSuggestions {
                    generation: state.suggest_generation,
                    query: state.query.clone(),
                })
            } else {
                state.suggestions.clear();
                None
            }
        }

        Event::SuggestionsLoaded { generation, places } => {
            if generation != state.suggest_generation {
                tracing::debug!(
                    "Dropping stale suggestions (generation {}, current {})",
                    generation,
                    state.suggest_generation
                );
                return (state, None);
            }
            state.phase = if places.is_empty() {
                Phase::SuggestEmpty
            } else {
                Phase::Suggesting
            };
            state.suggestions = places;
            None
        }

        Event::SuggestionsFailed { generation, error } => {
            // Autocomplete is best-effort; never surfaces as an error
            tracing::warn!("Suggestion lookup failed: {}", error);
            if generation == state.suggest_generation {
                state.suggestions.clear();
                state.phase = Phase::SuggestEmpty;
            }
            None
        }

        Event::SuggestionPicked(place) => {
            state.query = place.name.clone();
            state.suggestions.clear();
            state.suggest_generation += 1;
            state.picked = Some(place);
            state.phase = Phase::Typing;
            None
        }

        Event::Submitted => {
            // Every submit supersedes whatever is still in flight
            state.submit_generation += 1;
            state.suggest_generation += 1;
            state.suggestions.clear();

            if state.query.trim().is_empty() {
                state.fail(WeatherError::EmptyQuery);
                return (state, None);
            }

            // A pick stays trusted until the text is edited
            let target = match &state.picked {
                Some(place) if place.name == state.query => Target::Place(place.clone()),
                _ => Target::Query(state.query.trim().to_string()),
            };

            state.loading = true;
            state.error = None;
            state.weather = None;
            state.phase = Phase::Resolving;

            Some(Effect::FetchWeather {
                generation: state.submit_generation,
                target,
            })
        }

        Event::WeatherLoaded {
            generation,
            summary,
        } => {
            if generation != state.submit_generation {
                tracing::debug!("Dropping superseded weather for generation {}", generation);
                return (state, None);
            }
            state.loading = false;
            state.error = None;
            state.weather = Some(summary);
            state.phase = Phase::Ready;
            None
        }

        Event::WeatherFailed { generation, error } => {
            if generation != state.submit_generation {
                tracing::debug!("Dropping superseded failure for generation {}", generation);
                return (state, None);
            }
            state.fail(error);
            None
        }
    };

    (state, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathernow_core::NetworkError;
    use weathernow_lookup::{classify, CurrentConditions};

    fn place(name: &str, country: &str) -> Place {
        Place {
            name: name.into(),
            country: country.into(),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    fn summary() -> WeatherSummary {
        classify(
            place("Paris", "France"),
            CurrentConditions {
                temperature: 18.2,
                windspeed: 10.4,
                weathercode: 3,
                time: "2024-05-01T12:00".into(),
            },
        )
    }

    fn apply(state: SessionState, events: Vec<Event>) -> (SessionState, Vec<Effect>) {
        let mut effects = Vec::new();
        let mut state = state;
        for event in events {
            let (next, effect) = reduce(state, event);
            state = next;
            effects.extend(effect);
            assert!(
                !(state.weather.is_some() && state.error.is_some()),
                "weather and error both set"
            );
        }
        (state, effects)
    }

    #[test]
    fn starts_idle() {
        let state = SessionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.loading());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn short_query_clears_suggestions_without_effect() {
        let (state, effects) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Pa".into()),
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![place("Paris", "France")],
                },
                Event::QueryChanged("P".into()),
            ],
        );

        assert_eq!(effects.len(), 1);
        assert_eq!(state.phase(), Phase::Typing);
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn keystroke_requests_suggestions() {
        let (state, effect) = reduce(SessionState::new(), Event::QueryChanged("Par".into()));

        assert_eq!(state.phase(), Phase::Typing);
        assert_eq!(
            effect,
            Some(Effect::FetchSuggestions {
                generation: 1,
                query: "Par".into()
            })
        );
    }

    #[test]
    fn current_suggestions_are_applied() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Par".into()),
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![place("Paris", "France"), place("Parma", "Italy")],
                },
            ],
        );

        assert_eq!(state.phase(), Phase::Suggesting);
        assert_eq!(state.suggestions().len(), 2);
        assert_eq!(state.suggestions()[1].name, "Parma");
    }

    #[test]
    fn empty_suggestions_phase() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Qx".into()),
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![],
                },
            ],
        );
        assert_eq!(state.phase(), Phase::SuggestEmpty);
    }

    #[test]
    fn stale_suggestions_do_not_overwrite() {
        let (state, effects) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Pa".into()),
                Event::QueryChanged("Par".into()),
                Event::SuggestionsLoaded {
                    generation: 2,
                    places: vec![place("Paris", "France")],
                },
                // The response for "Pa" arrives last
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![place("Palermo", "Italy")],
                },
            ],
        );

        assert_eq!(effects.len(), 2);
        assert_eq!(state.suggestions().len(), 1);
        assert_eq!(state.suggestions()[0].name, "Paris");
    }

    #[test]
    fn suggestion_failure_is_silent() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Par".into()),
                Event::SuggestionsFailed {
                    generation: 1,
                    error: WeatherError::Transport(NetworkError::Timeout),
                },
            ],
        );

        assert!(state.error().is_none());
        assert!(state.suggestions().is_empty());
        assert_eq!(state.phase(), Phase::SuggestEmpty);
    }

    #[test]
    fn stale_suggestion_failure_keeps_list() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Pa".into()),
                Event::QueryChanged("Par".into()),
                Event::SuggestionsLoaded {
                    generation: 2,
                    places: vec![place("Paris", "France")],
                },
                Event::SuggestionsFailed {
                    generation: 1,
                    error: WeatherError::Transport(NetworkError::Timeout),
                },
            ],
        );

        assert_eq!(state.suggestions().len(), 1);
        assert_eq!(state.phase(), Phase::Suggesting);
    }

    #[test]
    fn pick_sets_query_and_blocks_late_suggestions() {
        let picked = place("Paris", "France");
        let (state, effects) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Par".into()),
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![picked.clone()],
                },
                Event::SuggestionPicked(picked),
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![place("Parma", "Italy")],
                },
            ],
        );

        assert_eq!(effects.len(), 1);
        assert_eq!(state.query(), "Paris");
        assert!(state.suggestions().is_empty());
        assert_eq!(state.phase(), Phase::Typing);
        assert!(!state.loading());
    }

    #[test]
    fn submit_after_pick_uses_picked_place() {
        let picked = place("Paris", "United States");
        let (_, effects) = apply(
            SessionState::new(),
            vec![Event::SuggestionPicked(picked.clone()), Event::Submitted],
        );

        assert_eq!(
            effects,
            vec![Effect::FetchWeather {
                generation: 1,
                target: Target::Place(picked)
            }]
        );
    }

    #[test]
    fn editing_after_pick_resolves_text_again() {
        let (_, effects) = apply(
            SessionState::new(),
            vec![
                Event::SuggestionPicked(place("Paris", "France")),
                Event::QueryChanged("Lyon".into()),
                Event::Submitted,
            ],
        );

        assert_eq!(
            effects.last(),
            Some(&Effect::FetchWeather {
                generation: 1,
                target: Target::Query("Lyon".into())
            })
        );
    }

    #[test]
    fn submit_starts_resolving() {
        let (state, effects) = apply(
            SessionState::new(),
            vec![Event::QueryChanged("Paris".into()), Event::Submitted],
        );

        assert_eq!(state.phase(), Phase::Resolving);
        assert!(state.loading());
        assert!(state.error().is_none());
        assert!(state.weather().is_none());
        assert_eq!(
            effects[1],
            Effect::FetchWeather {
                generation: 1,
                target: Target::Query("Paris".into())
            }
        );
    }

    #[test]
    fn submit_invalidates_pending_suggestions() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::SuggestionsLoaded {
                    generation: 1,
                    places: vec![place("Paris", "France")],
                },
            ],
        );

        assert!(state.suggestions().is_empty());
        assert_eq!(state.phase(), Phase::Resolving);
    }

    #[test]
    fn empty_submit_is_error_without_effect() {
        for query in ["", "   "] {
            let (state, effects) = apply(
                SessionState::new(),
                vec![Event::QueryChanged(query.into()), Event::Submitted],
            );

            assert!(!effects
                .iter()
                .any(|e| matches!(e, Effect::FetchWeather { .. })));
            assert_eq!(state.phase(), Phase::Error);
            assert_eq!(state.error(), Some(&WeatherError::EmptyQuery));
            assert_eq!(state.error_message(), Some("Please enter a city name."));
            assert!(!state.loading());
        }
    }

    #[test]
    fn empty_submit_clears_previous_weather() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
                Event::QueryChanged(String::new()),
                Event::Submitted,
            ],
        );

        assert!(state.weather().is_none());
        assert_eq!(state.error(), Some(&WeatherError::EmptyQuery));
    }

    #[test]
    fn weather_loaded_is_ready() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
            ],
        );

        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.loading());
        assert_eq!(state.weather(), Some(&summary()));
        assert!(state.error().is_none());
    }

    #[test]
    fn weather_failure_clears_weather() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
                Event::QueryChanged("Nowhereville".into()),
                Event::Submitted,
                Event::WeatherFailed {
                    generation: 2,
                    error: WeatherError::NotFound("Nowhereville".into()),
                },
            ],
        );

        assert_eq!(state.phase(), Phase::Error);
        assert!(!state.loading());
        assert!(state.weather().is_none());
        assert_eq!(
            state.error_message(),
            Some("City not found. Please enter a valid name.")
        );
    }

    #[test]
    fn superseded_submit_is_ignored() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::QueryChanged("Lyon".into()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
            ],
        );

        assert!(state.loading());
        assert!(state.weather().is_none());
        assert_eq!(state.phase(), Phase::Resolving);
        assert_eq!(state.submit_generation(), 2);
    }

    #[test]
    fn typing_keeps_displayed_weather() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
                Event::QueryChanged("Ly".into()),
            ],
        );

        assert_eq!(state.phase(), Phase::Typing);
        assert!(state.weather().is_some());
    }

    #[test]
    fn empty_submit_supersedes_pending_lookup() {
        let (state, _) = apply(
            SessionState::new(),
            vec![
                Event::QueryChanged("Paris".into()),
                Event::Submitted,
                Event::QueryChanged(String::new()),
                Event::Submitted,
                Event::WeatherLoaded {
                    generation: 1,
                    summary: summary(),
                },
            ],
        );

        assert_eq!(state.phase(), Phase::Error);
        assert!(state.weather().is_none());
        assert_eq!(state.error(), Some(&WeatherError::EmptyQuery));
        assert_eq!(state.submit_generation(), 2);
    }

    #[test]
    fn retry_after_failure_keeps_picked_place() {
        let picked = place("Paris", "United States");
        let (_, effects) = apply(
            SessionState::new(),
            vec![
                Event::SuggestionPicked(picked.clone()),
                Event::Submitted,
                Event::WeatherFailed {
                    generation: 1,
                    error: WeatherError::Transport(NetworkError::Timeout),
                },
                Event::Submitted,
            ],
        );

        assert_eq!(
            effects,
            vec![
                Effect::FetchWeather {
                    generation: 1,
                    target: Target::Place(picked.clone()),
                },
                Effect::FetchWeather {
                    generation: 2,
                    target: Target::Place(picked),
                },
            ]
        );
    }
}
