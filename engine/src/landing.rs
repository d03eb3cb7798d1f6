//! Landing page copy.
//!
//! Static text for the Stealthfolio page. Only the hero headline and the
//! strategy payload animate; everything else renders as-is.

use std::time::Duration;

use stealthfolio_types::{RevealConfig, RevealTiming};

pub const BRAND: &str = "Stealthfolio";
pub const NAV_BUTTONS: [&str; 2] = ["Docs", "Launch App"];

/// The page views reachable from the nav bar. `Hero` is the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Hero,
    Product,
    HowItWorks,
    Builders,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Hero,
        Section::Product,
        Section::HowItWorks,
        Section::Builders,
    ];

    /// Sections listed as nav links, in order.
    pub const LINKED: [Section; 3] = [Section::Product, Section::HowItWorks, Section::Builders];

    /// Nav link text. The hero has no link; "Back to top" leads there.
    #[must_use]
    pub fn nav_label(self) -> Option<&'static str> {
        match self {
            Section::Hero => None,
            Section::Product => Some("Product"),
            Section::HowItWorks => Some("How it works"),
            Section::Builders => Some("For builders"),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::Product => 1,
            Section::HowItWorks => 2,
            Section::Builders => 3,
        }
    }
}

// Hero

pub const EYEBROW: &str = "Uniswap v4 FHE hook";
pub const HEADLINE: &str = "Confidential portfolio rebalancing.";
pub const SUBTITLE: &str = "Stealthfolio lets you rebalance across multiple Uniswap v4 pools \
without revealing target allocations, trade sizes, or strategy logic, secured by Fhenix Fully \
Homomorphic Encryption.";
pub const CTAS: [&str; 2] = ["Start building", "View hook architecture"];

/// Headlines cycled through with `n`; the first is the default.
pub const TAGLINES: [&str; 4] = [
    HEADLINE,
    "True execution privacy.",
    "Multi-pool rebalancing.",
    "Encrypted rebalancing.",
];

pub const HEADLINE_TIMING: RevealTiming =
    RevealTiming::new(Duration::from_millis(250), Duration::from_millis(1400));

pub const META: [(&str, &str); 3] = [
    ("Built for", "Uniswap v4 hooks"),
    ("Powered by", "Fhenix FHE"),
    ("Focus", "Strategy privacy"),
];

pub const PANEL_TITLE: &str = "Encrypted rebalance";
pub const PAYLOAD_LABEL: &str = "Encrypted strategy payload";
pub const PAYLOAD: &str = "{ targetAllocations: [ETH, WBTC, USDC], maxSlippageBps: 30 }";
pub const PAYLOAD_TIMING: RevealTiming =
    RevealTiming::new(Duration::ZERO, Duration::from_millis(2000));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub label: &'static str,
    pub value: &'static str,
    pub desc: &'static str,
}

pub const CARDS: [Card; 3] = [
    Card {
        label: "On-chain view",
        value: "Ciphertext only",
        desc: "Observers see encrypted instructions, not target allocations or order sizing.",
    },
    Card {
        label: "Hook logic",
        value: "FHE compute",
        desc: "Stealthfolio evaluates your rebalance program over encrypted data inside the hook.",
    },
    Card {
        label: "Outcome",
        value: "Optimal fills",
        desc: "Routes liquidity across multiple pools without leaking strategy.",
    },
];

/// A titled block of copy: feature cards, steps and audience cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub body: &'static str,
}

// Product

pub const PRODUCT_TITLE: &str = "Why Stealthfolio";
pub const PRODUCT_INTRO: &str = "Protect your portfolio construction edge while routing through \
the deepest on-chain liquidity.";

pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "True execution privacy",
        body: "Orders, target weights, and rebalance cadence remain encrypted end-to-end. \
Market participants see final state changes, not the strategy that drove them.",
    },
    Feature {
        title: "Multi-pool rebalancing",
        body: "Coordinate trades across multiple Uniswap v4 pools in a single encrypted \
transaction. Stealthfolio optimizes fills while preserving your intent.",
    },
    Feature {
        title: "Institutional-grade controls",
        body: "Express constraints such as max slippage, per-asset bounds and venue allowlists \
in encrypted form. The hook enforces them without ever learning the raw parameters.",
    },
    Feature {
        title: "Composable by design",
        body: "Integrate Stealthfolio as a Uniswap v4 hook into existing DeFi infrastructure, \
vaults, and on-chain funds with minimal surface area.",
    },
];

// How it works

pub const HOW_TITLE: &str = "How it works";
pub const HOW_INTRO: &str = "Fhenix FHE lets Stealthfolio evaluate your rebalance program over \
encrypted inputs inside a Uniswap v4 hook. The chain never sees the plaintext strategy.";

pub const STEPS: [Feature; 3] = [
    Feature {
        title: "Encrypt your strategy",
        body: "Encode target allocations, constraints, and timing into an encrypted payload \
using Fhenix FHE primitives.",
    },
    Feature {
        title: "Attach to a Uniswap v4 pool",
        body: "Deploy Stealthfolio as a hook on the pools your portfolio routes through, \
without changing pool mechanics.",
    },
    Feature {
        title: "Encrypted rebalancing",
        body: "On rebalance, the hook evaluates your program homomorphically and executes \
trades that respect your encrypted constraints.",
    },
];

pub const TELEMETRY_LABEL: &str = "Hook telemetry (redacted)";
pub const TELEMETRY: [(&str, &str); 4] = [
    ("Assets", "[3]"),
    ("Total notional", "> $10M"),
    ("Slippage ceiling", "< 0.3%"),
    ("Strategy type", "Market-neutral"),
];
pub const TELEMETRY_FOOTNOTE: &str = "All sensitive fields are represented as ciphertext \
on-chain. Plain values shown here are for illustration only.";

// For builders

pub const BUILDERS_TITLE: &str = "For protocol builders and funds";
pub const BUILDERS_INTRO: &str = "Use Stealthfolio to ship private portfolio products without \
sacrificing decentralization or composability.";

pub const BUILDER_CARDS: [Feature; 3] = [
    Feature {
        title: "On-chain funds",
        body: "Launch strategies that rebalance transparently on-chain while keeping \
allocation logic proprietary to your LPs.",
    },
    Feature {
        title: "Structured products",
        body: "Wrap complex multi-asset strategies into a single user-facing instrument, \
with encrypted execution parameters.",
    },
    Feature {
        title: "DeFi protocols",
        body: "Plug Stealthfolio into vaults and lending markets to offer \
privacy-preserving rebalancing for your users.",
    },
];

// Footer

pub const FOOTER_LINKS: [&str; 3] = ["Back to top", "Security", "Contact"];

#[must_use]
pub fn copyright(year: i32) -> String {
    format!("© {year} {BRAND}. All rights reserved.")
}

#[must_use]
pub fn headline() -> RevealConfig {
    RevealConfig::new(HEADLINE).with_timing(HEADLINE_TIMING)
}

#[must_use]
pub fn payload() -> RevealConfig {
    RevealConfig::new(PAYLOAD).with_timing(PAYLOAD_TIMING)
}

/// Tagline after `current`, wrapping. Unknown text restarts at the first.
#[must_use]
pub fn next_tagline(current: &str) -> &'static str {
    TAGLINES
        .iter()
        .position(|tagline| *tagline == current)
        .map_or(TAGLINES[0], |idx| TAGLINES[(idx + 1) % TAGLINES.len()])
}
