// src/bin/seed.rs
// DOCUMENTATION: Seed the catalog with demo tours through the admin API
// PURPOSE: Development helper; run against a local instance with an empty catalog

use dotenv::dotenv;
use reqwest::Client;
use serde_json::json;
use std::env;
use std::process;
use std::time::Duration;

// --- ANSI terminal colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

// 1x1 grey JPEG, enough to exercise the image pipeline
const PIXEL: &str = "/9j/4AAQSkZJRgABAQEAYABgAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHRofHh0a\
HBwgJC4nICIsIxwcKDcpLDAxNDQ0Hyc5PTgyPC4zNDL/wAALCAABAAEBAREA/8QAFAABAAAAAAAA\
AAAAAAAAAAAAAv/EABQQAQAAAAAAAAAAAAAAAAAAAAD/2gAIAQEAAD8AN//Z";

fn demo_tours() -> Vec<serde_json::Value> {
    vec![
        json!({
            "title": "Imperial Cities Discovery",
            "description": "Seven days across the four imperial cities with a licensed local guide.",
            "type": "cultural",
            "days": 7,
            "min_spots": 2,
            "max_spots": 16,
            "daily": false,
            "main_image": PIXEL,
            "gallery": [PIXEL, PIXEL],
            "destinations": ["Marrakech", "Fes", "Meknes", "Rabat"],
            "program": [
                {"title": "Arrival in Marrakech", "description": "Airport pickup and medina walk.", "included": ["dinner"], "destinations": ["Marrakech"]},
                {"title": "Road to Fes", "description": "Scenic drive over the Middle Atlas.", "included": ["breakfast", "lunch"], "destinations": ["Fes"]}
            ],
            "highlights": ["Licensed local guides", "Handpicked riads", "Small groups"],
            "available_dates": [
                {"start_date": "2026-10-03", "end_date": "2026-10-10", "price": 890.0, "spots": 16},
                {"start_date": "2026-11-07", "end_date": "2026-11-14", "price": 840.0, "spots": 16}
            ]
        }),
        json!({
            "title": "Agafay Desert Sunset",
            "description": "Day trip to the Agafay stone desert with camel ride and dinner under the stars.",
            "type": "desert",
            "days": 1,
            "min_spots": 1,
            "max_spots": 0,
            "daily": true,
            "daily_start_date": "2026-09-01",
            "daily_price": 75.0,
            "main_image": PIXEL,
            "gallery": [PIXEL],
            "destinations": ["Marrakech", "Agafay", "Lalla Takerkoust"],
            "program": [
                {"title": "Desert afternoon", "description": "Camel ride, sunset and berber dinner.", "included": ["dinner", "transport"], "destinations": ["Agafay"]}
            ],
            "highlights": ["Departs every day", "Hotel pickup included"]
        }),
    ]
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("SEED_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8004".to_string());
    let admin_token = env::var("ADMIN_TOKEN").unwrap_or_else(|_| "admin-token-dev".to_string());

    println!("{}{}Seeding demo tours at {}{}", BOLD, CYAN, base_url, RESET);

    let client = match Client::builder().timeout(Duration::from_secs(30)).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}Failed to build HTTP client: {}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    let mut failures = 0;

    for tour in demo_tours() {
        let title = tour["title"].as_str().unwrap_or("<untitled>").to_string();

        let response = client
            .post(format!("{}/tours", base_url))
            .header("X-Admin-Token", &admin_token)
            .json(&tour)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                println!("  {}created{} {}", GREEN, RESET, title);
            }
            Ok(res) => {
                failures += 1;
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                eprintln!("  {}failed{} {} ({}): {}", RED, RESET, title, status, body);
            }
            Err(e) => {
                failures += 1;
                eprintln!("  {}failed{} {}: {}", RED, RESET, title, e);
            }
        }
    }

    if failures > 0 {
        eprintln!("{}{} tour(s) failed to seed{}", RED, failures, RESET);
        process::exit(1);
    }

    println!("{}{}Done.{}", BOLD, GREEN, RESET);
}
