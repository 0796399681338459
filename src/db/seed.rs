use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::db::{upsert_game, upsert_pigeon, upsert_week};
use crate::error::Result;
use crate::models::{Game, GameStatus, Pigeon};

/// Bypasses the lock check in `upsert_pick`; demo weeks are already locked.
async fn insert_pick_raw(
    pool: &SqlitePool,
    pigeon_number: u32,
    game_id: u32,
    picked_home: bool,
    predicted_margin: u32,
    created_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"INSERT OR REPLACE INTO picks (pigeon_number, game_id, picked_home, predicted_margin, created_at)
           VALUES (?,?,?,?,?)"#,
    )
    .bind(pigeon_number)
    .bind(game_id)
    .bind(picked_home)
    .bind(predicted_margin)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

/// Seed a small demo season: two finished weeks, one live week and one open for picks.
pub async fn seed_data(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pigeons")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::info!("Database already seeded ({} pigeons found), skipping.", count);
        return Ok(());
    }

    tracing::info!("Seeding database with demo season...");

    let pigeons = [
        (1, "Andy"),
        (2, "Beth"),
        (3, "Carlos"),
        (4, "Dee"),
        (5, "Eli"),
        (6, "Fran"),
    ];
    for (number, name) in pigeons {
        upsert_pigeon(
            pool,
            &Pigeon {
                pigeon_number: number,
                pigeon_name: name.to_string(),
            },
        )
        .await?;
    }

    let now = Utc::now();
    // (week, lock offset from now in days, status of its games)
    let weeks = [
        (1, -16, GameStatus::Final),
        (2, -9, GameStatus::Final),
        (3, -2, GameStatus::InProgress),
        (4, 5, GameStatus::Scheduled),
    ];

    // (home, away, home score, away score) per slot; scores only used once a game has started
    let slate = [
        ("KC", "BAL", 27, 20),
        ("PHI", "DAL", 24, 24),
        ("BUF", "MIA", 17, 31),
        ("SF", "SEA", 23, 13),
    ];

    let season_start = Utc.with_ymd_and_hms(2025, 9, 4, 17, 0, 0).single().unwrap_or(now);

    for (week, lock_offset, status) in weeks {
        upsert_week(pool, week, now + Duration::days(lock_offset)).await?;

        for (slot, (home, away, home_score, away_score)) in slate.iter().enumerate() {
            let slot = slot as u32;
            let game_id = week * 100 + slot + 1;
            // only the first two games of the live week have kicked off
            let game_status = match status {
                GameStatus::InProgress if slot >= 2 => GameStatus::Scheduled,
                other => other,
            };
            let started = game_status.has_started();

            upsert_game(
                pool,
                &Game {
                    game_id,
                    week_number: week,
                    kickoff_at: season_start
                        + Duration::days(7 * i64::from(week - 1))
                        + Duration::hours(3 * i64::from(slot)),
                    home_abbr: home.to_string(),
                    away_abbr: away.to_string(),
                    status: game_status,
                    home_score: started.then_some(home_score + week as i32),
                    away_score: started.then_some(*away_score),
                },
            )
            .await?;

            if status == GameStatus::Scheduled {
                continue;
            }
            for (number, _) in pigeons {
                // spread of margins and sides that varies by pigeon, week and game
                let seed = number * 7 + week * 3 + slot * 5;
                let picked_home = seed % 3 != 0;
                let margin = if seed % 11 == 0 { 0 } else { seed % 14 };
                // pigeon 6 skips the last game each week to exercise unfilled picks
                if number == 6 && slot == 3 {
                    continue;
                }
                insert_pick_raw(pool, number, game_id, picked_home, margin, now).await?;
            }
        }
    }

    tracing::info!("Database seeded successfully.");
    Ok(())
}
