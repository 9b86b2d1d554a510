// Step 4: the decision engine fans out three coordinated actions.

use super::*;

const ENGINE: Point = Point::new(50.0, 14.0);

const ACTIONS: [Point; 3] = [
    Point::new(18.0, 66.0),
    Point::new(50.0, 66.0),
    Point::new(82.0, 66.0),
];

const fn dispatch(to: Point, delay: u64, accent: Rgb) -> Link {
    Link { from: ENGINE, to, mode: RevealMode::Full, delay: ms(delay), duration: ms(1000), accent }
}

pub static STEP: StepContent = StepContent {
    label: "Decision",
    cards: &[
        Card {
            key: "Inter-Store Transfer",
            title: "Inter-Store Transfer",
            subtitle: "Move 30 units from Store A",
            note: "Surplus 85 · 3.2 km · ETA 4h",
            badge: Some("EXECUTING"),
            panel_title: None,
            detail: "Automatically initiates a stock transfer from the nearest location with surplus inventory. The system calculates the optimal transfer quantity considering both locations' safety stock levels.",
            accent: BLUE,
            pos: ACTIONS[0],
            appear: ms(600),
            gauge: None,
        },
        Card {
            key: "Route ONDC Orders",
            title: "Route ONDC Orders",
            subtitle: "Redirect to nearest FC",
            note: "Bhiwandi FC: 200+ units",
            badge: Some("EXECUTING"),
            panel_title: None,
            detail: "For incoming ONDC orders, the system automatically routes fulfillment to the Bhiwandi Fulfillment Center instead of Store B. This prevents stockouts while maintaining customer delivery promises.",
            accent: TEAL,
            pos: ACTIONS[1],
            appear: ms(800),
            gauge: None,
        },
        Card {
            key: "Trigger Supplier Reorder",
            title: "Trigger Supplier Reorder",
            subtitle: "Auto-generate PO #4492",
            note: "Arvind Mills · 5 days · 100u",
            badge: Some("EXECUTING"),
            panel_title: None,
            detail: "Purchase order is automatically generated and sent to the primary supplier. The reorder quantity is calculated using Economic Order Quantity (EOQ) formulas considering lead time and demand forecast.",
            accent: VIOLET,
            pos: ACTIONS[2],
            appear: ms(1000),
            gauge: None,
        },
    ],
    master: Card {
        key: "engine",
        title: "Decision Engine",
        subtitle: "Three maneuvers, one system",
        note: "Click to Explain Strategy",
        badge: None,
        panel_title: Some("Decision Logic: Coordinated Response"),
        detail: "Instead of disjointed manual fixes, the Decision Engine executes three simultaneous maneuvers: 1) Balances local inventory via Inter-Store Transfer. 2) Protects customer experience by Routing ONDC orders to the Warehouse. 3) Replenishes global supply by Triggering a Vendor Reorder. 4) All actions happen instantly in parallel.",
        accent: BLUE,
        pos: ENGINE,
        appear: ms(0),
        gauge: None,
    },
    metrics: &[],
    beacons: &[Beacon {
        label: "Orchestration Logic",
        card: ContextCard {
            title: "Automated Orchestration",
            body: "This is where the ROI happens. SyncOne doesn't just flag the problem; it fixes it. By automating the 'Inter-Store Transfer' and 'ONDC Rerouting', we eliminate the 4-hour delay typical of human decision-making. This enables 'Save the Sale' capabilities that manual systems simply cannot achieve, directly impacting the bottom line.",
        },
        pos: Point::new(12.0, 2.0),
        appear: ms(1500),
    }],
    links: &[
        dispatch(ACTIONS[0], 400, BLUE),
        dispatch(ACTIONS[1], 600, TEAL),
        dispatch(ACTIONS[2], 800, VIOLET),
    ],
    caption: Some(Caption {
        text: "From insight to coordinated action within one system.",
        y: 96.0,
        appear: ms(1500),
    }),
};
