// Step 1: four channels, each running its own inventory in isolation.

use super::*;

const SYNC_FAILED: &str = "FAILED";

const fn sync_gauge(delay: u64) -> Option<Gauge> {
    Some(Gauge {
        caption: "Inventory Sync",
        status: SYNC_FAILED,
        fill: 0.35,
        delay: ms(delay),
        duration: ms(1000),
    })
}

const STORE_A: Point = Point::new(27.0, 16.0);
const STORE_B: Point = Point::new(73.0, 16.0);
const AMAZON: Point = Point::new(27.0, 50.0);
const ONDC: Point = Point::new(73.0, 50.0);

const fn broken(from: Point, to: Point, delay: u64) -> Link {
    Link { from, to, mode: RevealMode::Partial, delay: ms(delay), duration: ms(1500), accent: RED }
}

pub static STEP: StepContent = StepContent {
    label: "Fragmentation",
    cards: &[
        Card {
            key: "Store A",
            title: "Store A",
            subtitle: "Flagship Outlet",
            note: "",
            badge: Some("ISOLATED"),
            panel_title: None,
            detail: "Physical retail store with its own inventory management system. Currently operates in isolation, unaware of stock levels at other locations.",
            accent: BLUE,
            pos: STORE_A,
            appear: ms(0),
            gauge: sync_gauge(500),
        },
        Card {
            key: "Store B",
            title: "Store B",
            subtitle: "Mall Location",
            note: "",
            badge: Some("ISOLATED"),
            panel_title: None,
            detail: "Second physical location with separate inventory tracking. Cannot automatically transfer stock from Store A when running low.",
            accent: BLUE,
            pos: STORE_B,
            appear: ms(200),
            gauge: sync_gauge(700),
        },
        Card {
            key: "Amazon",
            title: "Amazon",
            subtitle: "Seller Central",
            note: "",
            badge: Some("ISOLATED"),
            panel_title: None,
            detail: "E-commerce marketplace channel. Inventory is manually updated, leading to overselling when physical stores deplete stock.",
            accent: ORANGE,
            pos: AMAZON,
            appear: ms(400),
            gauge: sync_gauge(900),
        },
        Card {
            key: "ONDC",
            title: "ONDC",
            subtitle: "Open Network",
            note: "",
            badge: Some("ISOLATED"),
            panel_title: None,
            detail: "Open Network for Digital Commerce - India's open protocol for e-commerce. Requires real-time inventory sync which is currently missing.",
            accent: TEAL,
            pos: ONDC,
            appear: ms(600),
            gauge: sync_gauge(1100),
        },
    ],
    master: Card {
        key: "problem",
        title: "System Fragmentation",
        subtitle: "4 disconnected silos causing stockouts and capital inefficiency.",
        note: "Click to Analyze",
        badge: None,
        panel_title: Some("The Problem: Fragmentation"),
        detail: "Current Landscape: 4 Disconnected Silos. 1) Stores A & B operate locally, blind to each other's stock. 2) Amazon & ONDC are manually updated, leading to inevitable overselling. Result: 4-8% revenue loss and poor customer experience due to lack of synchronization.",
        accent: RED,
        pos: Point::new(50.0, 84.0),
        appear: ms(1000),
        gauge: None,
    },
    metrics: &[],
    beacons: &[
        Beacon {
            label: "Strategic Choice: Why Retail?",
            card: ContextCard {
                title: "Why Retail?",
                body: "Retail is chosen deliberately as the representative vertical because inventory fragmentation, stockouts, and multi-channel complexity are universally understandable problems that can be communicated visually in under ninety seconds. This allows judges to immediately grasp the value of a unified operations layer without requiring technical explanation.",
            },
            pos: Point::new(86.0, 2.0),
            appear: ms(1500),
        },
        Beacon {
            label: "The Hidden Cost",
            card: ContextCard {
                title: "The Economics of Fragmentation",
                body: "The 4-8% revenue loss is not just about lost sales; it is about capital inefficiency. When inventory is trapped in the wrong channel (e.g., surplus in Store A, stockout in Amazon), working capital is frozen. SyncOne unlocks this capital by virtualizing inventory across all nodes, effectively increasing available stock without increasing inventory investment.",
            },
            pos: Point::new(12.0, 70.0),
            appear: ms(2000),
        },
    ],
    links: &[
        broken(STORE_A, STORE_B, 800),
        broken(AMAZON, ONDC, 1000),
        broken(STORE_A, AMAZON, 1200),
        broken(STORE_B, ONDC, 1400),
    ],
    caption: None,
};
