/// A purchasable Pro plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    /// Price in major currency units
    pub amount: u32,
    pub description: &'static str,
}

pub static PLANS: [Plan; 3] = [
    Plan {
        name: "Standard Monthly",
        amount: 119,
        description: "Perfect for rolling month-to-month access.",
    },
    Plan {
        name: "Standard 4-Months",
        amount: 400,
        description: "Save ₹76 every term. Best value for professionals.",
    },
    Plan {
        name: "Founder's Promo",
        amount: 50,
        description: "Extremely limited introductory pricing. Renews at standard rates.",
    },
];

pub fn find_plan(name: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.name == name)
}
