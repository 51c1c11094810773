//! DetailResolver - Resolves the director/genre/synopsis dialog of a movie.
//!
//! A dialog is opened with [`DetailResolver::open`] and, for remote facets,
//! filled by [`DetailResolver::resolve`]. Closing the dialog while a request
//! is outstanding makes the late answer a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::domain::catalog::Movie;
use crate::domain::detail::{DetailPayload, DetailRequest, DetailStatus, Facet, UnknownFacet};
use crate::domain::foundation::StateMachine;
use crate::ports::{GatewayError, MovieGateway};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    #[error(transparent)]
    UnknownFacet(#[from] UnknownFacet),

    #[error("failed to load {facet} details: {source}")]
    Remote {
        facet: Facet,
        #[source]
        source: GatewayError,
    },
}

/// Point-in-time view of a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub status: DetailStatus,
    pub movie: Movie,
    pub payload: Option<DetailPayload>,
    pub error: Option<DetailError>,
}

#[derive(Debug)]
struct DialogState {
    status: DetailStatus,
    movie: Movie,
    /// `None` when the requested facet was not recognized.
    facet: Option<Facet>,
    payload: Option<DetailPayload>,
    error: Option<DetailError>,
}

impl DialogState {
    fn advance(&mut self, next: DetailStatus) {
        match self.status.transition_to(next) {
            Ok(status) => self.status = status,
            Err(error) => tracing::debug!(error = %error, "Ignoring detail transition"),
        }
    }

    fn finish(&mut self, outcome: Result<DetailPayload, DetailError>) {
        match outcome {
            Ok(payload) => {
                tracing::debug!(facet = %payload.facet(), "Detail resolved");
                self.advance(DetailStatus::Resolved);
                self.payload = Some(payload);
            }
            Err(error) => {
                self.advance(DetailStatus::Failed);
                self.error = Some(error);
            }
        }
    }
}

#[derive(Debug)]
struct DialogInner {
    open: AtomicBool,
    state: Mutex<DialogState>,
}

/// Handle to one open detail dialog. Clones share the same dialog.
#[derive(Debug, Clone)]
pub struct DetailDialog {
    inner: Arc<DialogInner>,
}

impl DetailDialog {
    fn new(state: DialogState) -> Self {
        Self {
            inner: Arc::new(DialogInner {
                open: AtomicBool::new(true),
                state: Mutex::new(state),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }

    /// Dismisses the dialog. Once this returns, outstanding results are
    /// discarded and the state no longer changes.
    pub fn close(&self) {
        let _state = self.lock();
        self.inner.open.store(false, Ordering::SeqCst);
    }

    pub fn status(&self) -> DetailStatus {
        self.lock().status
    }

    pub fn view(&self) -> DetailView {
        let state = self.lock();
        DetailView {
            status: state.status,
            movie: state.movie.clone(),
            payload: state.payload.clone(),
            error: state.error.clone(),
        }
    }

    /// The outcome once resolved or failed; `None` while pending.
    pub fn outcome(&self) -> Option<Result<DetailPayload, DetailError>> {
        let state = self.lock();
        match (&state.payload, &state.error) {
            (Some(payload), _) => Some(Ok(payload.clone())),
            (None, Some(error)) => Some(Err(error.clone())),
            (None, None) => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DialogState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolver for movie detail dialogs. Nothing is cached.
pub struct DetailResolver {
    gateway: Arc<dyn MovieGateway>,
}

impl DetailResolver {
    pub fn new(gateway: Arc<dyn MovieGateway>) -> Self {
        Self { gateway }
    }

    /// Opens a dialog for `facet` of `movie`.
    ///
    /// Synopsis resolves immediately from the movie itself and an unknown
    /// facet fails immediately; director and genre stay `Idle` until
    /// [`resolve`](Self::resolve) is awaited.
    pub fn open(&self, facet: &str, movie: Movie) -> DetailDialog {
        let mut state = DialogState {
            status: DetailStatus::Idle,
            movie,
            facet: None,
            payload: None,
            error: None,
        };

        match facet.parse::<Facet>() {
            Ok(facet) => {
                state.facet = Some(facet);
                if facet.is_local() {
                    state.advance(DetailStatus::Resolving);
                    let payload = DetailPayload::Synopsis(state.movie.clone());
                    state.finish(Ok(payload));
                }
            }
            Err(unknown) => {
                tracing::warn!(facet = %unknown.0, "Unknown detail facet");
                state.finish(Err(DetailError::UnknownFacet(unknown)));
            }
        }

        DetailDialog::new(state)
    }

    /// Fetches a remote facet into the dialog and returns the resulting status.
    ///
    /// No-op for dialogs that are closed or no longer `Idle`. A response
    /// arriving after the dialog was closed is dropped.
    pub async fn resolve(&self, dialog: &DetailDialog) -> DetailStatus {
        let request = {
            let mut state = dialog.lock();
            if !dialog.is_open() || state.status != DetailStatus::Idle {
                return state.status;
            }
            let facet = match state.facet {
                Some(facet) => facet,
                None => return state.status,
            };
            state.advance(DetailStatus::Resolving);
            DetailRequest::new(facet, state.movie.clone())
        };

        let outcome = self.fetch(&request).await;

        // Checked under the state lock so a concurrent close() is ordered
        // either before or after the update.
        let mut state = dialog.lock();
        if !dialog.is_open() {
            tracing::debug!(facet = %request.facet, "Discarding detail for closed dialog");
            return state.status;
        }
        state.finish(outcome);
        state.status
    }

    /// Resolves a facet without a dialog.
    pub async fn show(&self, facet: &str, movie: Movie) -> Result<DetailPayload, DetailError> {
        let facet: Facet = facet.parse()?;
        self.fetch(&DetailRequest::new(facet, movie)).await
    }

    async fn fetch(&self, request: &DetailRequest) -> Result<DetailPayload, DetailError> {
        let movie = &request.movie;
        let result = match request.facet {
            Facet::Director => self
                .gateway
                .get_director(&movie.director.name)
                .await
                .map(DetailPayload::Director),
            Facet::Genre => self
                .gateway
                .get_genre(&movie.genre.name)
                .await
                .map(DetailPayload::Genre),
            Facet::Synopsis => Ok(DetailPayload::Synopsis(movie.clone())),
        };

        result.map_err(|source| DetailError::Remote {
            facet: request.facet,
            source,
        })
    }
}
