//! Runs reducer effects on the tokio runtime.
//! Network work happens in spawned tasks; results come back over an mpsc
//! channel and are applied on the caller's thread via `complete`.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use weathernow_lookup::{ForecastClient, LocationResolver, Place};

use crate::state::{reduce, Effect, Event, SessionState};
use crate::workflow;

/// Outcome of one spawned effect. `None` when a debounced suggestion request
/// was superseded before it went out.
#[derive(Debug)]
pub struct Completion(Option<Event>);

/// Receiving half for effect completions
pub struct Completions {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Completions {
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}

pub struct SessionDriver {
    state: SessionState,
    resolver: LocationResolver,
    forecast: ForecastClient,
    debounce: Duration,
    latest_suggest: watch::Sender<u64>,
    tx: mpsc::UnboundedSender<Completion>,
    in_flight: usize,
}

impl SessionDriver {
    pub fn new(
        resolver: LocationResolver,
        forecast: ForecastClient,
        debounce: Duration,
    ) -> (Self, Completions) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (latest_suggest, _) = watch::channel(0);
        let driver = Self {
            state: SessionState::new(),
            resolver,
            forecast,
            debounce,
            latest_suggest,
            tx,
            in_flight: 0,
        };
        (driver, Completions { rx })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of spawned effects whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.dispatch(Event::QueryChanged(text.into()));
    }

    pub fn on_submit(&mut self) {
        self.dispatch(Event::Submitted);
    }

    pub fn on_suggestion_pick(&mut self, place: Place) {
        self.dispatch(Event::SuggestionPicked(place));
    }

    /// Pick the suggestion at `index`; false if there is none.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        match self.state.suggestions().get(index).cloned() {
            Some(place) => {
                self.on_suggestion_pick(place);
                true
            }
            None => false,
        }
    }

    /// Apply a completion received from `Completions`.
    /// Returns true if the visible state changed.
    pub fn complete(&mut self, completion: Completion) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Some(event) = completion.0 else {
            return false;
        };
        let before = self.state.clone();
        self.dispatch(event);
        self.state != before
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self, completions: &mut Completions) {
        while self.in_flight > 0 {
            match completions.recv().await {
                Some(completion) => {
                    self.complete(completion);
                }
                None => break,
            }
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        let (state, effect) = reduce(std::mem::take(&mut self.state), event);
        self.state = state;
        self.latest_suggest
            .send_replace(self.state.suggest_generation());

        if let Some(effect) = effect {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        self.in_flight += 1;
        let tx = self.tx.clone();

        match effect {
            Effect::FetchSuggestions { generation, query } => {
                let resolver = self.resolver.clone();
                let mut latest = self.latest_suggest.subscribe();
                let debounce = self.debounce;

                tokio::spawn(async move {
                    // Wake early once a newer keystroke or a submit lands
                    tokio::select! {
                        _ = tokio::time::sleep(debounce) => {}
                        _ = async {
                            let _ = latest.wait_for(|current| *current != generation).await;
                        } => {}
                    }
                    if *latest.borrow() != generation {
                        tracing::debug!("Skipping superseded suggestion lookup for {:?}", query);
                        let _ = tx.send(Completion(None));
                        return;
                    }

                    let event = match workflow::fetch_suggestions(&resolver, &query).await {
                        Ok(places) => Event::SuggestionsLoaded { generation, places },
                        Err(error) => Event::SuggestionsFailed { generation, error },
                    };
                    let _ = tx.send(Completion(Some(event)));
                });
            }
            Effect::FetchWeather { generation, target } => {
                let resolver = self.resolver.clone();
                let forecast = self.forecast.clone();

                tokio::spawn(async move {
                    let event = match workflow::fetch_weather(&resolver, &forecast, target).await {
                        Ok(summary) => {
                            tracing::info!(
                                "Weather ready for {}: {}",
                                summary.place.display_name(),
                                summary.description
                            );
                            Event::WeatherLoaded {
                                generation,
                                summary,
                            }
                        }
                        Err(error) => Event::WeatherFailed { generation, error },
                    };
                    let _ = tx.send(Completion(Some(event)));
                });
            }
        }
    }
}
