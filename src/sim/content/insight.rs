// Step 3: forecast vs. stock for one SKU at Store B.

use super::*;

pub static STEP: StepContent = StepContent {
    label: "Insight",
    cards: &[],
    master: Card {
        key: "risk",
        title: "Inventory Risk Detected",
        subtitle: "Store B · Denim Jacket (SKU: DNM-JKT-001)",
        note: "Supply: 45 units   Demand: 120 units",
        badge: Some("CRITICAL"),
        panel_title: Some("Risk Detection"),
        detail: "SyncOne continuously monitors inventory levels across all channels. When a potential stockout is detected (based on demand forecasting), it automatically generates an alert and prepares recommended actions. This proactive approach prevents lost sales before they happen.",
        accent: AMBER,
        pos: Point::new(50.0, 18.0),
        appear: ms(0),
        gauge: Some(Gauge {
            caption: "Supply vs Demand Risk",
            status: "-62.5% Gap",
            fill: 0.375,
            delay: ms(0),
            duration: ms(1500),
        }),
    },
    metrics: &[
        Metric {
            key: "Current Stock",
            label: "Current Stock",
            target: 45,
            suffix: "",
            detail: "Current inventory count at Store B for the Denim Jacket SKU. This is determined by aggregating POS sales data and receiving records.",
            accent: SLATE,
            pos: Point::new(20.0, 62.0),
            delay: ms(300),
        },
        Metric {
            key: "7-Day Demand",
            label: "7-Day Demand",
            target: 120,
            suffix: "",
            detail: "Predicted demand based on historical sales velocity, seasonality, and current trends. Machine learning models analyze past 90 days of data.",
            accent: RED,
            pos: Point::new(50.0, 62.0),
            delay: ms(500),
        },
        Metric {
            key: "Days to Stockout",
            label: "Days to Stockout",
            target: 3,
            suffix: "",
            detail: "Calculated by dividing current stock by average daily sales velocity. This alert triggers when the value drops below the safety threshold (typically 7 days).",
            accent: AMBER,
            pos: Point::new(80.0, 62.0),
            delay: ms(700),
        },
    ],
    beacons: &[Beacon {
        label: "Predictive Reality",
        card: ContextCard {
            title: "Beyond Basic BI",
            body: "Most dashboards show what happened. SyncOne focuses on what will happen. By correlating '7-Day Demand' (120 units) against 'Current Stock' (45 units), we don't just show data points; we surface an immediate operational risk (-62.5% gap). This shift from descriptive to predictive analytics is what empowers store managers to act before a stockout occurs.",
        },
        pos: Point::new(86.0, 2.0),
        appear: ms(1500),
    }],
    links: &[],
    caption: Some(Caption {
        text: "Proactive detection replaces reactive firefighting.",
        y: 96.0,
        appear: ms(1500),
    }),
};
