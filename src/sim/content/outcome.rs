// Step 5: projected outcomes.

use super::*;

pub static STEP: StepContent = StepContent {
    label: "Outcome",
    cards: &[],
    master: Card {
        key: "impact",
        title: "SyncOne Retail Impact",
        subtitle: "View Summary",
        note: "",
        badge: None,
        panel_title: Some("Business Impact: Operational Excellence"),
        detail: "SyncOne delivers compounding value: 1) Reduced stockouts (+35%) directly boosts revenue. 2) Improved sell-through (+22%) minimizes markdown losses. 3) Better capital efficiency (+18%) frees up cash flow. Total estimated impact: ₹4.5 Cr annual improvement.",
        accent: BLUE,
        pos: Point::new(50.0, 86.0),
        appear: ms(2200),
        gauge: None,
    },
    metrics: &[
        Metric {
            key: "Stockouts Reduced",
            label: "Stockouts Reduced",
            target: 35,
            suffix: "%",
            detail: "35% reduction in stockout incidents across all channels. This translates to approximately ₹2.4 Cr in prevented lost sales annually for a mid-sized retailer.",
            accent: GREEN,
            pos: Point::new(20.0, 28.0),
            delay: ms(500),
        },
        Metric {
            key: "Sell-through Improved",
            label: "Sell-through Improved",
            target: 22,
            suffix: "%",
            detail: "22% improvement in sell-through rate (ratio of sold inventory to received inventory). Better demand matching means less markdown and waste.",
            accent: BLUE,
            pos: Point::new(50.0, 28.0),
            delay: ms(800),
        },
        Metric {
            key: "Working Capital Efficiency",
            label: "Working Capital Efficiency",
            target: 18,
            suffix: "%",
            detail: "18% improvement in working capital efficiency. Reduced safety stock requirements and faster inventory turnover frees up capital for growth.",
            accent: VIOLET,
            pos: Point::new(80.0, 28.0),
            delay: ms(1100),
        },
    ],
    beacons: &[
        Beacon {
            label: "Validation Logic: The Projection",
            card: ContextCard {
                title: "Theoretical Basis",
                body: "Since historical SKU data wasn't provided, these figures are projected using established Inventory Theory. 1) 35% Stockout Reduction: Based on the 'Portfolio Effect': pooling inventory variance across 4 nodes statistically reduces stockout probability. 2) 18% Capital Efficiency: Derived from the 'Square Root Law of Inventory' (Safety Stock ∝ √N). Unifying 4 silos theoretically yields ~50% lower variance; we projected a conservative 18% realization.",
            },
            pos: Point::new(14.0, 2.0),
            appear: ms(2000),
        },
        Beacon {
            label: "Platform Moat: India Stack",
            card: ContextCard {
                title: "The ONDC Advantage",
                body: "While competitors like SAP and Salesforce offer robust ERPs, they lack deep, native integration with India's digital public infrastructure (ONDC, UPI). SyncOne's 'India Stack Fabric' is not just a feature; it's a defensive moat. It allows for hyper-local discovery and lower-cost logistics that global giants simply cannot replicate without rebuilding their core architecture for the Indian market.",
            },
            pos: Point::new(84.0, 2.0),
            appear: ms(2500),
        },
    ],
    links: &[],
    caption: Some(Caption {
        text: "Vertical workflows create compounding operational value. The future of retail is synchronized.",
        y: 62.0,
        appear: ms(1200),
    }),
};
