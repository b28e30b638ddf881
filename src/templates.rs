use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, models::RankedMovie, tmdb::SearchMovie};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[RankedMovie]) -> String {
    page(
        "My Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Movies" }
                            p class="mt-2 text-gray-600" { "Films I've watched, ranked by my rating." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add your first one." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for ranked in movies.iter().rev() {
                                (movie_card(ranked))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, errors: &[String]) -> String {
    page(
        "Edit Rating",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" {
                            (movie.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                        }
                        p class="mt-2 text-gray-600" { (movie.description) }

                        @if !errors.is_empty() {
                            ul class="mt-6 space-y-1" {
                                @for error in errors {
                                    li class="text-sm text-red-600" { (error) }
                                }
                            }
                        }

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10, e.g. 7.5" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="rating" id="rating" value=[movie.rating.map(|r| r.to_string())];
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="review" id="review" value=[movie.review.as_deref()];
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Done" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn add_page(error: Option<&str>) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add Movie" }
                        p class="mt-2 text-gray-600" { "Search the movie database by title." }

                        @if let Some(error) = error {
                            p class="mt-6 text-sm text-red-600" { (error) }
                        }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title";
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(candidates: &[SearchMovie]) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }

                        @if candidates.is_empty() {
                            p class="mt-6 text-gray-600" { "No matches found. Try another title." }
                        } @else {
                            ul class="mt-6 divide-y divide-gray-200" {
                                @for candidate in candidates {
                                    li class="py-3" {
                                        a class="text-blue-600 hover:text-blue-800" href=(format!("/select?id={}", candidate.id)) {
                                            (candidate.title)
                                            @if !candidate.release_date.is_empty() {
                                                span class="text-gray-500" { " (" (candidate.release_date) ")" }
                                            }
                                        }
                                        @if !candidate.overview.is_empty() {
                                            p class="mt-1 text-sm text-gray-600" { (candidate.overview) }
                                        }
                                    }
                                }
                            }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_card(ranked: &RankedMovie) -> Markup {
    let movie = &ranked.movie;
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-6" {
                @if movie.img_url.is_empty() {
                    div class="h-36 w-24 flex-none rounded bg-gray-200" {}
                } @else {
                    img class="h-36 w-24 flex-none rounded object-cover" src=(movie.img_url) alt=(movie.title);
                }

                div class="min-w-0 flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            span class="mr-2 text-gray-400" { "#" (ranked.rank) }
                            (movie.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                        }
                        p class="flex-none font-semibold text-gray-900" {
                            @if let Some(rating) = movie.rating {
                                (format!("{rating:.1}")) span class="text-gray-500" { " / 10" }
                            } @else {
                                span class="text-gray-500" { "Not rated yet" }
                            }
                        }
                    }

                    p class="mt-2 text-sm text-gray-600" { (movie.description) }

                    @if let Some(review) = &movie.review {
                        p class="mt-2 text-sm italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                    }

                    div class="mt-4 flex gap-4 text-sm" {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Edit" }
                        a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: i32, title: &str, rating: f64, rank: usize) -> RankedMovie {
        RankedMovie {
            rank,
            movie: movie::Model {
                id,
                title: title.to_string(),
                year: "2010".to_string(),
                description: "desc".to_string(),
                rating: Some(rating),
                review: None,
                img_url: String::new(),
            },
        }
    }

    #[test]
    fn index_lists_best_movie_first() {
        let html = index_page(&[rated(1, "Worst Pick", 2.0, 2), rated(2, "Best Pick", 9.0, 1)]);

        let best = html.find("Best Pick").unwrap();
        let worst = html.find("Worst Pick").unwrap();
        assert!(best < worst);
        assert!(html.contains("#1"));
    }

    #[test]
    fn index_shows_empty_state() {
        let html = index_page(&[]);

        assert!(html.contains("No movies yet"));
    }

    #[test]
    fn error_page_carries_the_message() {
        let html = error_page("movie 7 not found".to_string());

        assert!(html.contains("movie 7 not found"));
    }
}
