//! Repository contract tests
//!
//! Every check runs against the in-memory repositories. The same checks
//! run against Postgres in a throwaway container when `--ignored` is passed.

use chrono::{Duration, TimeZone, Utc};

use tadoku::{
    AppError,
    db::repositories::Repositories,
    models::{Contest, ContestLog, LanguageCode, MediumId, Ranking, Role, User},
};

fn contest(description: &str, year: i32, open: bool) -> Contest {
    Contest {
        id: 0,
        description: description.to_string(),
        start: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2020, 1, 30, 0, 0, 0).unwrap(),
        open,
    }
}

async fn user(repos: &Repositories, email: &str, display_name: &str) -> User {
    let mut user = User {
        email: email.to_string(),
        display_name: display_name.to_string(),
        password: "$argon2id$hash".to_string(),
        role: Role::User,
        ..Default::default()
    };
    repos.users.store(&mut user).await.unwrap();
    user
}

async fn users_contract(repos: &Repositories) {
    let mut stored = user(repos, "foo@bar.com", "John Doe").await;
    assert_ne!(stored.id, 0);

    let found = repos.users.find_by_email("foo@bar.com").await.unwrap().unwrap();
    assert_eq!(found, stored);
    assert!(repos.users.find_by_email("nobody@bar.com").await.unwrap().is_none());

    stored.display_name = "Jane Doe".to_string();
    repos.users.store(&mut stored).await.unwrap();
    assert_eq!(repos.users.find_by_id(stored.id).await.unwrap().display_name, "Jane Doe");

    repos.users.update_password(stored.id, "$argon2id$new").await.unwrap();
    assert_eq!(repos.users.find_by_id(stored.id).await.unwrap().password, "$argon2id$new");

    let mut duplicate = User {
        email: "foo@bar.com".to_string(),
        display_name: "Imposter".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        repos.users.store(&mut duplicate).await,
        Err(AppError::AlreadyExists(_))
    ));

    assert!(matches!(repos.users.find_by_id(9999).await, Err(AppError::NotFound(_))));
}

async fn contests_contract(repos: &Repositories) {
    assert!(matches!(repos.contests.find_all().await, Err(AppError::NotFound(_))));
    assert!(matches!(repos.contests.find_by_id(0).await, Err(AppError::NotFound(_))));
    assert!(repos.contests.get_open_contests().await.unwrap().is_empty());

    let mut first = contest("Foo 2017", 2017, false);
    repos.contests.store(&mut first).await.unwrap();
    assert_ne!(first.id, 0);

    first.description = "Foo 2017 renamed".to_string();
    repos.contests.store(&mut first).await.unwrap();
    assert_eq!(
        repos.contests.find_by_id(first.id).await.unwrap().description,
        "Foo 2017 renamed"
    );

    for (description, year) in [("Foo 2018", 2018), ("Foo 2019", 2019)] {
        repos.contests.store(&mut contest(description, year, false)).await.unwrap();
    }

    let all = repos.contests.find_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].description, "Foo 2019");

    let recent = repos.contests.find_recent(2).await.unwrap();
    let descriptions: Vec<_> = recent.iter().map(|c| c.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Foo 2019", "Foo 2018"]);

    // Running means open and inside the window
    let now = Utc::now();
    let mut running = Contest {
        id: 0,
        description: "Running".to_string(),
        start: now - Duration::hours(1),
        end: now + Duration::hours(1),
        open: true,
    };
    repos.contests.store(&mut running).await.unwrap();
    assert_eq!(repos.contests.get_open_contests().await.unwrap(), vec![running.id]);
    assert_eq!(repos.contests.get_running_contests().await.unwrap(), vec![running.id]);

    let mut second_open = contest("Second", 2019, true);
    assert!(matches!(
        repos.contests.store(&mut second_open).await,
        Err(AppError::OpenContestAlreadyExists)
    ));
    assert_eq!(repos.contests.get_open_contests().await.unwrap().len(), 1);
}

async fn contest_logs_contract(repos: &Repositories) {
    let mut log = ContestLog {
        id: 0,
        contest_id: 1,
        user_id: 1,
        language_code: LanguageCode::Japanese,
        medium_id: MediumId::Book,
        amount: 10.0,
        description: "foobar".to_string(),
    };
    repos.contest_logs.store(&mut log).await.unwrap();
    assert_ne!(log.id, 0);

    let mut updated = ContestLog {
        language_code: LanguageCode::Korean,
        medium_id: MediumId::Comic,
        amount: 20.0,
        description: "foobar 2".to_string(),
        ..log.clone()
    };
    repos.contest_logs.store(&mut updated).await.unwrap();
    assert_eq!(repos.contest_logs.find_by_id(log.id).await.unwrap(), updated);

    repos.contest_logs.delete(log.id).await.unwrap();
    assert!(matches!(
        repos.contest_logs.find_by_id(log.id).await,
        Err(AppError::NotFound(_))
    ));

    let expected = [
        (LanguageCode::Japanese, MediumId::Book, 10.0, "foobar"),
        (LanguageCode::Korean, MediumId::Comic, 20.0, "foobar 2"),
        (LanguageCode::Global, MediumId::Net, 30.0, "foobar 3"),
    ];
    for (language, medium, amount, description) in expected {
        let mut log = ContestLog {
            id: 0,
            contest_id: 1,
            user_id: 1,
            language_code: language,
            medium_id: medium,
            amount,
            description: description.to_string(),
        };
        repos.contest_logs.store(&mut log).await.unwrap();
    }
    // Unrelated logs of another contest and another user
    for (contest_id, user_id) in [(2, 1), (1, 2)] {
        let mut log = ContestLog {
            id: 0,
            contest_id,
            user_id,
            language_code: LanguageCode::Korean,
            medium_id: MediumId::Book,
            amount: 0.0,
            description: "barbar".to_string(),
        };
        repos.contest_logs.store(&mut log).await.unwrap();
    }

    let logs = repos.contest_logs.find_all(1, 1).await.unwrap();
    assert_eq!(logs.len(), expected.len());
    for (language, medium, amount, description) in expected {
        let log = logs.iter().find(|l| l.language_code == language).unwrap();
        assert_eq!(log.medium_id, medium);
        assert_eq!(log.amount, amount);
        assert_eq!(log.description, description);
        assert_eq!((log.contest_id, log.user_id), (1, 1));
    }
}

async fn rankings_contract(repos: &Repositories) {
    let john = user(repos, "john@bar.com", "John Doe").await;
    let jane = user(repos, "jane@bar.com", "Jane Doe").await;

    for (user, amount) in [(&john, 5.0), (&jane, 50.0)] {
        for language in [LanguageCode::Global, LanguageCode::Japanese] {
            let mut ranking = Ranking::new(1, user.id, language);
            repos.rankings.create(&mut ranking).await.unwrap();
            assert_ne!(ranking.id, 0);
        }

        for (language, medium) in [
            (LanguageCode::Japanese, MediumId::Book),
            (LanguageCode::Korean, MediumId::Comic),
        ] {
            let mut log = ContestLog {
                id: 0,
                contest_id: 1,
                user_id: user.id,
                language_code: language,
                medium_id: medium,
                amount,
                description: String::new(),
            };
            repos.contest_logs.store(&mut log).await.unwrap();
        }
        repos.rankings.recompute(1, user.id).await.unwrap();
    }

    let johns = repos.rankings.find_all(1, john.id).await.unwrap();
    let amount = |language| {
        johns
            .iter()
            .find(|r: &&Ranking| r.language_code == language)
            .map(|r| r.amount)
            .unwrap()
    };
    assert!((amount(LanguageCode::Japanese) - 5.0).abs() < 1e-4);
    assert!((amount(LanguageCode::Global) - 6.0).abs() < 1e-4);

    let board = repos
        .rankings
        .rankings_for_contest(1, LanguageCode::Global)
        .await
        .unwrap();
    let names: Vec<_> = board.iter().map(|r| r.user_display_name.as_str()).collect();
    assert_eq!(names, vec!["Jane Doe", "John Doe"]);
    assert!((board[0].amount - 60.0).abs() < 1e-4);

    let mut languages = repos
        .rankings
        .get_all_languages_for_contest_and_user(1, john.id)
        .await
        .unwrap();
    languages.sort();
    assert_eq!(languages, vec![LanguageCode::Global, LanguageCode::Japanese]);

    assert_eq!(repos.rankings.find_all(1, john.id).await.unwrap().len(), 2);
    assert!(repos.rankings.find_all(2, john.id).await.unwrap().is_empty());

    let mut duplicate = Ranking::new(1, john.id, LanguageCode::Japanese);
    assert!(repos.rankings.create(&mut duplicate).await.is_err());

    let mut stored = Ranking {
        id: johns[0].id,
        ..Ranking::new(1, john.id, LanguageCode::Korean)
    };
    assert!(repos.rankings.create(&mut stored).await.is_err());
}

async fn concurrent_recompute_contract(repos: &Repositories) {
    let john = user(repos, "john@bar.com", "John Doe").await;
    let mut ranking = Ranking::new(1, john.id, LanguageCode::Global);
    repos.rankings.create(&mut ranking).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repos = repos.clone();
            let user_id = john.id;
            tokio::spawn(async move {
                let mut log = ContestLog {
                    id: 0,
                    contest_id: 1,
                    user_id,
                    language_code: LanguageCode::Japanese,
                    medium_id: MediumId::Book,
                    amount: 1.0,
                    description: String::new(),
                };
                repos.contest_logs.store(&mut log).await?;
                repos.rankings.recompute(1, user_id).await
            })
        })
        .collect();
    for result in futures::future::join_all(handles).await {
        result.unwrap().unwrap();
    }

    let rankings = repos.rankings.find_all(1, john.id).await.unwrap();
    assert!((rankings[0].amount - 8.0).abs() < 1e-4);
}

#[tokio::test]
async fn test_in_memory_users() {
    users_contract(&Repositories::in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_contests() {
    contests_contract(&Repositories::in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_contest_logs() {
    contest_logs_contract(&Repositories::in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_rankings() {
    rankings_contract(&Repositories::in_memory()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_in_memory_concurrent_recompute() {
    concurrent_recompute_contract(&Repositories::in_memory()).await;
}

mod postgres {
    use sqlx::PgPool;
    use testcontainers::{ContainerAsync, runners::AsyncRunner};
    use testcontainers_modules::postgres::Postgres;

    use super::*;

    /// Start a fresh database, migrate it and build the repositories.
    ///
    /// The container must outlive the repositories.
    async fn setup() -> (ContainerAsync<Postgres>, Repositories) {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");
        tadoku::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        (container, Repositories::postgres(pool))
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_postgres_users() {
        let (_container, repos) = setup().await;
        users_contract(&repos).await;
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_postgres_contests() {
        let (_container, repos) = setup().await;
        contests_contract(&repos).await;
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_postgres_contest_logs() {
        let (_container, repos) = setup().await;
        contest_logs_contract(&repos).await;
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_postgres_rankings() {
        let (_container, repos) = setup().await;
        rankings_contract(&repos).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "requires Docker"]
    async fn test_postgres_concurrent_recompute() {
        let (_container, repos) = setup().await;
        concurrent_recompute_contract(&repos).await;
    }
}
