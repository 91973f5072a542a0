//! Application facade — wires the API client, session store, and derived
//! state together, and owns the cross-cutting rules: bearer tokens come from
//! the current session at call time, and any 401 clears the session store
//! before the error reaches the caller.

use tracing::{info, warn};

use crate::api::{self, ApiClient, ApiError};
use crate::catalog::CatalogState;
use crate::config::ClientConfig;
use crate::models::auth::User;
use crate::models::review::{Review, ReviewDraft};
use crate::reviews::{self, ProfileStats};
use crate::session::SessionStore;
use crate::workflow::admin::{MovieForm, ensure_admin};
use crate::workflow::detail::DetailState;

/// The application service: one instance per running client.
#[derive(Debug)]
pub struct AppService {
    api: ApiClient,
    store: SessionStore,
}

impl AppService {
    pub fn new(config: &ClientConfig, store: SessionStore) -> Self {
        Self {
            api: ApiClient::new(config),
            store,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Session-invalidation hook: a 401 from any call clears the store.
    fn check<T>(&mut self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(error) = &result {
            if error.invalidates_session() && self.store.is_authenticated() {
                warn!("session invalidated by the backend, logging out");
                self.store.clear();
            }
        }
        result
    }

    fn token(&self) -> Result<String, ApiError> {
        self.store
            .token()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Unauthorized("not logged in".into()))
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Authenticate and persist the session. Failures come back as the
    /// user-facing message for the status class.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, String> {
        match api::auth::login(&self.api, username, password).await {
            Ok(session) => {
                let user = session.user.clone();
                self.store.set(session).map_err(|e| e.to_string())?;
                Ok(user)
            }
            Err(error) => Err(api::auth::login_failure_message(&error)),
        }
    }

    /// Create an account. Does not authenticate; log in afterwards.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), String> {
        api::auth::register(&self.api, username, email, password)
            .await
            .map_err(|error| api::auth::register_failure_message(&error))
    }

    /// Clear identity and credential unconditionally.
    pub fn logout(&mut self) {
        self.store.clear();
        info!("logged out");
    }

    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    /// Availability probe against the movie endpoint.
    pub async fn check_backend(&self) -> bool {
        self.api.probe().await
    }

    /// Replace the catalog with a fresh full fetch.
    pub async fn load_catalog(&mut self, catalog: &mut CatalogState) -> Result<(), ApiError> {
        let movies = self.check(api::movies::list(&self.api).await)?;
        catalog.set_movies(movies);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Movie detail & reviews
    // -----------------------------------------------------------------------

    /// Load a movie and its reviews into the fenced detail state.
    pub async fn load_movie_detail(
        &mut self,
        detail: &mut DetailState,
        movie_id: i64,
    ) -> Result<(), ApiError> {
        let tag = detail.begin(movie_id);
        let movie = self.check(api::movies::get(&self.api, movie_id).await)?;
        let review_list = self.check(api::reviews::for_movie(&self.api, movie_id).await)?;
        detail.apply_movie(tag, movie);
        detail.apply_reviews(tag, review_list);
        Ok(())
    }

    /// Re-fetch only the parent movie record, keeping the local review list.
    /// The server-computed average is authoritative after any mutation.
    ///
    /// Best-effort: the mutation that triggered it has already succeeded, so
    /// a failure here only leaves the displayed average stale. A 401 still
    /// clears the session via `check` before the error is swallowed.
    async fn refresh_parent_movie(&mut self, detail: &mut DetailState, movie_id: i64) {
        let tag = detail.begin(movie_id);
        match self.check(api::movies::get(&self.api, movie_id).await) {
            Ok(movie) => {
                detail.apply_movie(tag, movie);
            }
            Err(error) => {
                warn!(movie_id, %error, "movie refresh failed; displayed average may be stale");
            }
        }
    }

    /// Create the caller's review: splice it into the local list immediately,
    /// then re-fetch the parent movie for its updated average.
    pub async fn submit_review(
        &mut self,
        detail: &mut DetailState,
        movie_id: i64,
        draft: &ReviewDraft,
    ) -> Result<Review, ApiError> {
        let token = self.token()?;
        let review = self.check(api::reviews::create(&self.api, movie_id, draft, &token).await)?;
        reviews::upsert(detail.reviews_mut(), review.clone());
        self.refresh_parent_movie(detail, movie_id).await;
        Ok(review)
    }

    /// Update the caller's review; same propagation as creation.
    pub async fn update_review(
        &mut self,
        detail: &mut DetailState,
        movie_id: i64,
        review_id: i64,
        draft: &ReviewDraft,
    ) -> Result<Review, ApiError> {
        let token = self.token()?;
        let review = self.check(api::reviews::update(&self.api, review_id, draft, &token).await)?;
        reviews::upsert(detail.reviews_mut(), review.clone());
        self.refresh_parent_movie(detail, movie_id).await;
        Ok(review)
    }

    /// Delete the caller's review; removes it locally and re-fetches the
    /// parent movie.
    pub async fn delete_review(
        &mut self,
        detail: &mut DetailState,
        movie_id: i64,
        review_id: i64,
    ) -> Result<(), ApiError> {
        let token = self.token()?;
        self.check(api::reviews::delete(&self.api, review_id, &token).await)?;
        reviews::remove(detail.reviews_mut(), review_id);
        self.refresh_parent_movie(detail, movie_id).await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Profile
    // -----------------------------------------------------------------------

    /// The authenticated user's reviews plus profile statistics. A failed
    /// single-movie lookup degrades to "genre unknown" rather than failing
    /// the whole view.
    pub async fn profile(&mut self) -> Result<(Vec<Review>, ProfileStats), ApiError> {
        let user_id = self
            .store
            .current()
            .map(|s| s.user.id)
            .ok_or_else(|| ApiError::Unauthorized("not logged in".into()))?;
        let token = self.token()?;

        let own = self.check(api::reviews::for_user(&self.api, user_id, &token).await)?;

        let mut genres: Vec<(i64, String)> = Vec::new();
        for review in &own {
            if genres.iter().any(|(id, _)| *id == review.movie_id) {
                continue;
            }
            match api::movies::get(&self.api, review.movie_id).await {
                Ok(movie) => genres.push((review.movie_id, movie.genre)),
                Err(error) => {
                    warn!(movie_id = review.movie_id, %error, "movie lookup failed for profile");
                }
            }
        }

        let stats = reviews::profile_stats(&own, |movie_id| {
            genres
                .iter()
                .find(|(id, _)| *id == movie_id)
                .map(|(_, genre)| genre.as_str())
        });
        Ok((own, stats))
    }

    // -----------------------------------------------------------------------
    // Admin catalog mutations
    // -----------------------------------------------------------------------

    /// Create or update a movie from the admin form. Role and poster URL are
    /// validated locally before any request; success resets the form and
    /// reloads the full catalog (full reload is the consistency mechanism);
    /// failure keeps the form open with the raw server error.
    pub async fn admin_submit(
        &mut self,
        form: &mut MovieForm,
        catalog: &mut CatalogState,
    ) -> Result<(), String> {
        let draft = form.prepare(self.store.current()).map_err(|e| e.to_string())?;
        let token = self.token().map_err(|e| e.to_string())?;

        let result = match form.editing() {
            Some(id) => api::movies::update(&self.api, id, &draft, &token)
                .await
                .map(|_| ()),
            None => api::movies::create(&self.api, &draft, &token)
                .await
                .map(|_| ()),
        };

        match self.check(result) {
            Ok(()) => {
                form.complete(Ok(()));
                self.load_catalog(catalog).await.map_err(|e| e.to_string())
            }
            Err(error) => {
                let message = error.to_string();
                form.complete(Err(message.clone()));
                Err(message)
            }
        }
    }

    /// Delete a movie; role re-checked locally before dispatch, full catalog
    /// reload on success.
    pub async fn admin_delete_movie(
        &mut self,
        movie_id: i64,
        catalog: &mut CatalogState,
    ) -> Result<(), String> {
        ensure_admin(self.store.current()).map_err(|e| e.to_string())?;
        let token = self.token().map_err(|e| e.to_string())?;

        self.check(api::movies::delete(&self.api, movie_id, &token).await)
            .map_err(|e| e.to_string())?;
        self.load_catalog(catalog).await.map_err(|e| e.to_string())
    }
}
