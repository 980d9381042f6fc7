//! Tests for command execution
//!
//! These tests verify:
//! - Routing of every command to its engine operation
//! - Malformed numeric arguments yield empty lists for every range and
//!   threshold query
//! - JSON payload decoding for create/update
//! - Serialized response shapes

use moviedb::command::{Command, CommandType, Response};
use moviedb::config::Config;
use moviedb::engine::Engine;
use moviedb::{MovieError, MovieRecord};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_seeded_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_path(temp_dir.path().join("movies.json"))
        .create_if_missing(true)
        .build();
    let engine = Engine::open(config).unwrap();

    for movie in [
        json!({"id": "1", "title": "Alpha", "year": 1990, "imdb_rating": 9.5, "genre": "Drama"}),
        json!({"id": "2", "title": "Beta", "year": 1990, "imdb_rating": 4.0, "runtime_minutes": 95}),
        json!({"id": "3", "title": "Gamma", "year": 2004, "runtime_minutes": 170}),
    ] {
        engine.execute(Command::Create { movie }).unwrap();
    }

    (temp_dir, engine)
}

fn movie_ids(response: Response) -> Vec<String> {
    response
        .movies()
        .expect("list response")
        .iter()
        .map(|m| m.id.clone())
        .collect()
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_command_types() {
    assert_eq!(Command::All.command_type(), CommandType::Read);
    assert_eq!(Command::Metrics.command_type(), CommandType::Read);
    assert_eq!(
        Command::Delete { id: "1".into() }.command_type(),
        CommandType::Write
    );
    assert_eq!(
        Command::Create { movie: json!({}) }.command_type(),
        CommandType::Write
    );
}

#[test]
fn test_execute_queries() {
    let (_temp, engine) = setup_seeded_engine();

    assert_eq!(movie_ids(engine.execute(Command::All).unwrap()), vec!["1", "2", "3"]);
    assert_eq!(
        movie_ids(engine.execute(Command::ByYear { year: "1990".into() }).unwrap()),
        vec!["1", "2"]
    );
    assert_eq!(
        movie_ids(
            engine
                .execute(Command::ByYearRange {
                    from: "2000".into(),
                    to: "2010".into()
                })
                .unwrap()
        ),
        vec!["3"]
    );
    assert_eq!(
        movie_ids(engine.execute(Command::ByMinDuration { minutes: "100".into() }).unwrap()),
        vec!["3"]
    );
    assert_eq!(
        movie_ids(
            engine
                .execute(Command::ByTitleAndYear {
                    title: "bet".into(),
                    year: "1990".into()
                })
                .unwrap()
        ),
        vec!["2"]
    );
    assert_eq!(
        movie_ids(engine.execute(Command::ByMinRating { rating: "9".into() }).unwrap()),
        vec!["1"]
    );
    assert_eq!(
        movie_ids(engine.execute(Command::ByMaxRating { rating: "5".into() }).unwrap()),
        vec!["2"]
    );
    assert_eq!(movie_ids(engine.execute(Command::TopRated).unwrap()), vec!["1"]);
    assert_eq!(movie_ids(engine.execute(Command::LowRated).unwrap()), vec!["2"]);
}

#[test]
fn test_execute_get() {
    let (_temp, engine) = setup_seeded_engine();

    match engine.execute(Command::Get { id: "3".into() }).unwrap() {
        Response::Movie(Some(movie)) => assert_eq!(movie.title, "Gamma"),
        other => panic!("unexpected response: {:?}", other),
    }

    assert_eq!(
        engine.execute(Command::Get { id: "99".into() }).unwrap(),
        Response::Movie(None)
    );
}

#[test]
fn test_execute_metrics() {
    let (_temp, engine) = setup_seeded_engine();

    match engine.execute(Command::Metrics).unwrap() {
        Response::Metrics(summary) => {
            assert_eq!(summary.total_movies, 3);
            assert_eq!(summary.average_rating, 6.75);
            assert_eq!(summary.total_genres, 1);
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

// =============================================================================
// Malformed Argument Tests
// =============================================================================

#[test]
fn test_malformed_numbers_yield_empty_lists() {
    let (_temp, engine) = setup_seeded_engine();

    let commands = vec![
        Command::ByYear { year: "nineteen".into() },
        Command::ByYearRange {
            from: "abc".into(),
            to: "2000".into(),
        },
        Command::ByYearRange {
            from: "1900".into(),
            to: "".into(),
        },
        Command::ByMinDuration { minutes: "long".into() },
        Command::ByTitleAndYear {
            title: "alpha".into(),
            year: "x".into(),
        },
        Command::ByMinRating { rating: "high".into() },
        Command::ByMaxRating { rating: "NaN".into() },
    ];

    for command in commands {
        let response = engine.execute(command.clone()).unwrap();
        assert_eq!(response, Response::Movies(Vec::new()), "{:?}", command);
    }
}

#[test]
fn test_inverted_year_range_is_empty() {
    let (_temp, engine) = setup_seeded_engine();

    let response = engine
        .execute(Command::ByYearRange {
            from: "2010".into(),
            to: "1980".into(),
        })
        .unwrap();

    assert!(movie_ids(response).is_empty());
}

#[test]
fn test_storage_errors_still_surface_for_queries() {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::open_path(&temp_dir.path().join("absent.json")).unwrap();

    let err = engine.execute(Command::ByYear { year: "1990".into() }).unwrap_err();

    assert!(matches!(err, MovieError::StorageRead { .. }));
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_execute_create_keeps_payload_verbatim() {
    let (_temp, engine) = setup_seeded_engine();
    let payload = json!({"id": "4", "title": "Delta", "tagline": "Fourth", "year": 2020});

    let response = engine
        .execute(Command::Create {
            movie: payload.clone(),
        })
        .unwrap();

    assert_eq!(serde_json::to_value(&response).unwrap(), payload);
}

#[test]
fn test_execute_create_rejects_bad_payload() {
    let (_temp, engine) = setup_seeded_engine();

    let err = engine
        .execute(Command::Create {
            movie: json!({"title": "No Id"}),
        })
        .unwrap_err();

    assert!(matches!(err, MovieError::Serialization(_)));
    assert_eq!(engine.all().unwrap().len(), 3);
}

#[test]
fn test_execute_update() {
    let (_temp, engine) = setup_seeded_engine();

    let response = engine
        .execute(Command::Update {
            id: "2".into(),
            patch: json!({"imdb_rating": 5.5, "director": "Someone"}),
        })
        .unwrap();

    let expected = MovieRecord::new("2", "Beta")
        .with_year(1990)
        .with_runtime(95)
        .with_rating(5.5)
        .with_director("Someone");
    assert_eq!(response, Response::Movie(Some(expected)));
}

#[test]
fn test_execute_update_missing_is_not_found() {
    let (_temp, engine) = setup_seeded_engine();

    let err = engine
        .execute(Command::Update {
            id: "99".into(),
            patch: json!({"title": "Ghost"}),
        })
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_execute_delete() {
    let (_temp, engine) = setup_seeded_engine();

    let response = engine.execute(Command::Delete { id: "1".into() }).unwrap();

    assert_eq!(response, Response::Deleted { removed: 1 });
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"removed": 1})
    );
    assert!(engine
        .execute(Command::Delete { id: "1".into() })
        .unwrap_err()
        .is_not_found());
}

// =============================================================================
// Response Shape Tests
// =============================================================================

#[test]
fn test_absent_movie_serializes_as_null() {
    assert_eq!(
        serde_json::to_value(Response::Movie(None)).unwrap(),
        serde_json::Value::Null
    );
}

#[test]
fn test_movie_list_serializes_as_array() {
    let response = Response::Movies(vec![MovieRecord::new("1", "Alpha")]);

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!([{"id": "1", "title": "Alpha"}])
    );
}
