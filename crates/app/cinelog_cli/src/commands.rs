//! Command handlers: thin orchestration over `cinelog_core`.

use chrono::NaiveDate;

use cinelog_core::catalog::{CatalogFilter, CatalogState, SortKey};
use cinelog_core::config::ClientConfig;
use cinelog_core::models::movie::Movie;
use cinelog_core::models::review::Review;
use cinelog_core::reviews::{self, ReviewStats};
use cinelog_core::service::AppService;
use cinelog_core::session::SessionStore;
use cinelog_core::workflow::admin::MovieForm;
use cinelog_core::workflow::detail::DetailState;
use cinelog_core::workflow::review::ReviewForm;

use crate::cli::{AdminCommands, Commands, ReviewCommands, SortArg};
use crate::{Error, Result};

pub async fn dispatch(command: Commands) -> Result<()> {
    let config = ClientConfig::from_env();
    let mut service = AppService::new(&config, SessionStore::open());

    match command {
        Commands::Login { username, password } => login(&mut service, &username, &password).await,
        Commands::Register {
            username,
            email,
            password,
        } => register(&mut service, &username, &email, &password).await,
        Commands::Logout => {
            service.logout();
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => whoami(&service),
        Commands::Health => health(&service).await,
        Commands::Movies {
            search,
            genre,
            sort,
        } => movies(&mut service, search, genre, sort).await,
        Commands::Movie { id } => movie(&mut service, id).await,
        Commands::Review(command) => review(&mut service, command).await,
        Commands::Profile => profile(&mut service).await,
        Commands::Admin(command) => admin(&mut service, command).await,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), cinelog_core::version());
            Ok(())
        }
    }
}

async fn login(service: &mut AppService, username: &str, password: &str) -> Result<()> {
    let user = service
        .login(username, password)
        .await
        .map_err(Error::Custom)?;
    println!("Logged in as {} ({:?}).", user.username, user.role);
    Ok(())
}

async fn register(
    service: &mut AppService,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    service
        .register(username, email, password)
        .await
        .map_err(Error::Custom)?;
    println!("Registration successful! Please log in.");
    Ok(())
}

fn whoami(service: &AppService) -> Result<()> {
    match service.store().current() {
        Some(session) => println!(
            "{} (id {}, {:?})",
            session.user.username, session.user.id, session.user.role
        ),
        None => println!("Not logged in."),
    }
    Ok(())
}

async fn health(service: &AppService) -> Result<()> {
    if service.check_backend().await {
        println!("Backend is available at {}.", service.api().base_url());
    } else {
        println!("Backend is not available at {}.", service.api().base_url());
    }
    Ok(())
}

fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(rating) => format!("{rating:.1}"),
        None => "No ratings".to_string(),
    }
}

async fn movies(
    service: &mut AppService,
    search: Option<String>,
    genre: Option<String>,
    sort: SortArg,
) -> Result<()> {
    let mut catalog = CatalogState::new();
    service.load_catalog(&mut catalog).await?;

    let filter = CatalogFilter {
        search,
        genre,
        sort: match sort {
            SortArg::Title => SortKey::Title,
            SortArg::Rating => SortKey::Rating,
            SortArg::Year => SortKey::ReleaseDate,
        },
    };
    let view = catalog.filtered(&filter);

    println!(
        "{} of {} movies{}",
        view.len(),
        catalog.movies().len(),
        if filter.is_active() { " (filtered)" } else { "" }
    );
    for movie in &view {
        print_movie_line(movie);
    }
    if view.is_empty() && filter.is_active() {
        println!("No movies match. Genres in the catalog: {}", catalog.genres().join(", "));
    }
    Ok(())
}

fn print_movie_line(movie: &Movie) {
    println!(
        "  #{:<4} {:<32} {:<20} {}  [{}]  {}",
        movie.id,
        movie.title,
        movie.director,
        movie.release_date,
        movie.genre,
        format_rating(movie.average_rating),
    );
}

fn print_review(review: &Review, current_user: Option<i64>) {
    let who = review.username.as_deref().unwrap_or("unknown");
    let marker = if current_user == Some(review.user_id) {
        " (your review)"
    } else {
        ""
    };
    println!(
        "  {}/5 by {}{} on {}",
        review.rating,
        who,
        marker,
        review.created_at.format("%Y-%m-%d")
    );
    println!("      {}", review.comment);
}

async fn movie(service: &mut AppService, id: i64) -> Result<()> {
    let mut detail = DetailState::new();
    service.load_movie_detail(&mut detail, id).await?;

    let movie = detail
        .movie()
        .ok_or_else(|| Error::Custom("Movie not found".into()))?
        .clone();

    println!("{} ({})", movie.title, movie.release_date);
    println!("Directed by {}", movie.director);
    println!("Genre: {}", movie.genre);
    if let Some(duration) = movie.duration {
        println!("Duration: {duration} minutes");
    }
    println!("Rating: {}", format_rating(movie.average_rating));
    if !movie.description.is_empty() {
        println!("\n{}", movie.description);
    }

    let current_user = service.store().current().map(|s| s.user.id);
    let stats = ReviewStats::compute(detail.reviews());
    let ordered = reviews::order_for_display(detail.reviews().to_vec(), current_user);

    println!("\nReviews ({}):", stats.count);
    if ordered.is_empty() {
        println!("  No reviews yet. Be the first to share your thoughts!");
    }
    for review in &ordered {
        print_review(review, current_user);
    }
    Ok(())
}

/// Build the review form for this movie, seeded with the user's own review.
fn form_for(detail: &DetailState, movie_id: i64, user_id: Option<i64>) -> ReviewForm {
    let (own, _) = reviews::partition(detail.reviews().to_vec(), user_id);
    ReviewForm::new(movie_id, own)
}

async fn review(service: &mut AppService, command: ReviewCommands) -> Result<()> {
    match command {
        ReviewCommands::Add {
            movie_id,
            rating,
            comment,
        } => {
            let mut detail = DetailState::new();
            service.load_movie_detail(&mut detail, movie_id).await?;

            let session = service.store().current().cloned();
            let mut form = form_for(&detail, movie_id, session.as_ref().map(|s| s.user.id));
            form.begin_compose(session.as_ref())?;
            form.set_rating(rating)?;
            form.set_comment(&comment)?;
            let (draft, _) = form.submit(session.as_ref())?;

            match service.submit_review(&mut detail, movie_id, &draft).await {
                Ok(review) => {
                    form.complete_submit(Ok(review));
                    let average = detail.movie().and_then(|m| m.average_rating);
                    println!(
                        "Review submitted. The movie's rating is now {}.",
                        format_rating(average)
                    );
                    Ok(())
                }
                Err(error) => {
                    form.complete_submit(Err(error.to_string()));
                    Err(error.into())
                }
            }
        }
        ReviewCommands::Edit {
            movie_id,
            rating,
            comment,
        } => {
            let mut detail = DetailState::new();
            service.load_movie_detail(&mut detail, movie_id).await?;

            let session = service.store().current().cloned();
            let mut form = form_for(&detail, movie_id, session.as_ref().map(|s| s.user.id));
            form.begin_edit(session.as_ref())?;
            form.set_rating(rating)?;
            form.set_comment(&comment)?;
            let (draft, review_id) = form.submit(session.as_ref())?;
            let review_id =
                review_id.ok_or_else(|| Error::Custom("You have no review to edit".into()))?;

            match service
                .update_review(&mut detail, movie_id, review_id, &draft)
                .await
            {
                Ok(review) => {
                    form.complete_submit(Ok(review));
                    let average = detail.movie().and_then(|m| m.average_rating);
                    println!(
                        "Review updated. The movie's rating is now {}.",
                        format_rating(average)
                    );
                    Ok(())
                }
                Err(error) => {
                    form.complete_submit(Err(error.to_string()));
                    Err(error.into())
                }
            }
        }
        ReviewCommands::Delete { movie_id, yes } => {
            let mut detail = DetailState::new();
            service.load_movie_detail(&mut detail, movie_id).await?;

            let session = service.store().current().cloned();
            let mut form = form_for(&detail, movie_id, session.as_ref().map(|s| s.user.id));
            let review_id = form.request_delete(session.as_ref(), yes)?;

            match service.delete_review(&mut detail, movie_id, review_id).await {
                Ok(()) => {
                    form.complete_delete(Ok(()));
                    println!("Review deleted.");
                    Ok(())
                }
                Err(error) => {
                    form.complete_delete(Err(error.to_string()));
                    Err(error.into())
                }
            }
        }
    }
}

async fn profile(service: &mut AppService) -> Result<()> {
    let (own, stats) = service.profile().await?;

    println!("Reviews written: {}", stats.total_reviews);
    println!("Average rating given: {}", format_rating(stats.average_rating));
    if let Some(genre) = &stats.favorite_genre {
        println!("Favorite genre: {genre}");
    }
    for review in &own {
        println!(
            "  movie #{}: {}/5 on {}: {}",
            review.movie_id,
            review.rating,
            review.created_at.format("%Y-%m-%d"),
            review.comment
        );
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse()
        .map_err(|_| Error::Custom(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

async fn admin(service: &mut AppService, command: AdminCommands) -> Result<()> {
    let mut catalog = CatalogState::new();
    match command {
        AdminCommands::Add {
            title,
            director,
            genre,
            release_date,
            duration,
            description,
            poster_url,
        } => {
            let mut form = MovieForm::new();
            form.open_create();
            form.draft.title = title;
            form.draft.director = director;
            form.draft.genre = genre;
            form.draft.release_date = release_date.as_deref().map(parse_date).transpose()?;
            form.draft.duration = duration;
            form.draft.description = description;
            form.draft.poster_url = poster_url;

            service
                .admin_submit(&mut form, &mut catalog)
                .await
                .map_err(Error::Custom)?;
            println!("Movie created. Catalog now has {} movies.", catalog.movies().len());
            Ok(())
        }
        AdminCommands::Update {
            id,
            title,
            director,
            genre,
            release_date,
            duration,
            description,
            poster_url,
        } => {
            let mut detail = DetailState::new();
            service.load_movie_detail(&mut detail, id).await?;
            let movie = detail
                .movie()
                .ok_or_else(|| Error::Custom("Movie not found".into()))?
                .clone();

            let mut form = MovieForm::new();
            form.open_edit(&movie);
            if let Some(title) = title {
                form.draft.title = title;
            }
            if let Some(director) = director {
                form.draft.director = director;
            }
            if let Some(genre) = genre {
                form.draft.genre = genre;
            }
            if let Some(date) = release_date {
                form.draft.release_date = Some(parse_date(&date)?);
            }
            if let Some(duration) = duration {
                form.draft.duration = Some(duration);
            }
            if let Some(description) = description {
                form.draft.description = description;
            }
            if let Some(poster_url) = poster_url {
                form.draft.poster_url = Some(poster_url);
            }

            service
                .admin_submit(&mut form, &mut catalog)
                .await
                .map_err(Error::Custom)?;
            println!("Movie updated.");
            Ok(())
        }
        AdminCommands::Delete { id, yes } => {
            if !yes {
                return Err(Error::Custom(
                    "Deletion requires --yes (there is no undo)".into(),
                ));
            }
            service
                .admin_delete_movie(id, &mut catalog)
                .await
                .map_err(Error::Custom)?;
            println!("Movie deleted. Catalog now has {} movies.", catalog.movies().len());
            Ok(())
        }
    }
}
