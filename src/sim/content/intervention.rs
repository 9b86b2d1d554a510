// Step 2: the same four channels, now wired through one hub.

use super::*;

const HUB: Point = Point::new(50.0, 49.0);

const NODES: [Point; 4] = [
    Point::new(24.0, 12.0),
    Point::new(76.0, 12.0),
    Point::new(24.0, 86.0),
    Point::new(76.0, 86.0),
];

const fn synced(from: Point, delay: u64, accent: Rgb) -> Link {
    Link { from, to: HUB, mode: RevealMode::Full, delay: ms(delay), duration: ms(1200), accent }
}

pub static STEP: StepContent = StepContent {
    label: "Intervention",
    cards: &[
        Card {
            key: "Store A",
            title: "Store A",
            subtitle: "Flagship Outlet",
            note: "",
            badge: Some("SYNCED"),
            panel_title: None,
            detail: "Physical store now connected to the central hub. Inventory updates sync in real-time.",
            accent: BLUE,
            pos: NODES[0],
            appear: ms(0),
            gauge: None,
        },
        Card {
            key: "Store B",
            title: "Store B",
            subtitle: "Mall Location",
            note: "",
            badge: Some("SYNCED"),
            panel_title: None,
            detail: "Second store location now shares inventory visibility with all other channels.",
            accent: BLUE,
            pos: NODES[1],
            appear: ms(200),
            gauge: None,
        },
        Card {
            key: "Amazon",
            title: "Amazon",
            subtitle: "Seller Central",
            note: "",
            badge: Some("SYNCED"),
            panel_title: None,
            detail: "E-commerce channel now receives real-time stock updates, preventing overselling.",
            accent: ORANGE,
            pos: NODES[2],
            appear: ms(400),
            gauge: None,
        },
        Card {
            key: "ONDC",
            title: "ONDC",
            subtitle: "Open Network",
            note: "",
            badge: Some("SYNCED"),
            panel_title: None,
            detail: "Open network integration enables India-wide e-commerce with accurate inventory.",
            accent: TEAL,
            pos: NODES[3],
            appear: ms(600),
            gauge: None,
        },
    ],
    master: Card {
        key: "hub",
        title: "SyncOne Retail",
        subtitle: "Unified Intelligence",
        note: "Click for Strategy",
        badge: None,
        panel_title: Some("Solution: Unified Intelligence Layer"),
        detail: "SyncOne connects the 4 silos (Store A, Store B, Amazon, ONDC) into a single real-time network. It acts as the central brain that: 1) Aggregates inventory visibility. 2) Prevents overselling on digital channels. 3) Enables cross-channel fulfillment.",
        accent: BLUE,
        pos: HUB,
        appear: ms(500),
        gauge: None,
    },
    metrics: &[],
    beacons: &[
        Beacon {
            label: "Portfolio Logic",
            card: ContextCard {
                title: "Abstracting the Logic",
                body: "This central hub architecture is not specific to retail. We are demonstrating a 'Central Nervous System' pattern that applies equally to Healthcare (SyncOne Care) for staff rostering and Manufacturing (SyncOne Factory) for supply chain visibility. By mastering this unified state management in retail, we prove the core capability required for the entire portfolio strategy.",
            },
            pos: Point::new(10.0, 36.0),
            appear: ms(1500),
        },
        Beacon {
            label: "Implementation Strategy",
            card: ContextCard {
                title: "The 'Wrapper' Approach",
                body: "Enterprises fear 'rip-and-replace'. SyncOne avoids this by acting as a non-invasive wrapper layer. We use low-code connectors to hook into existing legacy ERPs (SAP, Oracle, Tally) without disturbing their core operations. This allows for rapid deployment (weeks, not months) and significantly lowers the barrier to adoption for large traditional retailers.",
            },
            pos: Point::new(88.0, 64.0),
            appear: ms(2000),
        },
    ],
    links: &[
        synced(NODES[0], 900, BLUE),
        synced(NODES[1], 1100, BLUE),
        synced(NODES[2], 1300, ORANGE),
        synced(NODES[3], 1500, TEAL),
    ],
    caption: Some(Caption {
        text: "Creating a unified single source of truth above existing silos.",
        y: 99.0,
        appear: ms(2000),
    }),
};
