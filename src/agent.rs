use crate::cards::{KpiCard, KpiIcon};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub title: String,
    pub client: String,
    pub address: String,
    pub when: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementBadge {
    Award,
    Trophy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub badge: AchievementBadge,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOverview {
    pub agent_name: String,
    pub standing: String,
    pub kpis: Vec<KpiCard>,
    pub appointments: Vec<Appointment>,
    pub achievements: Vec<Achievement>,
}

impl AgentOverview {
    pub fn greeting(&self) -> String {
        format!("Welcome back, {}", self.agent_name)
    }

    pub fn appointment_summary(&self) -> String {
        match self.appointments.len() {
            0 => "No appointments scheduled".to_string(),
            1 => "You have 1 appointment today".to_string(),
            n => format!("You have {n} appointments today"),
        }
    }

    pub fn sample(agent_name: &str) -> Self {
        let kpi = |title: &str, value: &str, change: &str, icon, rank| KpiCard {
            title: title.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            icon,
            rank,
        };
        let appointment = |title: &str, client: &str, address: &str, when: &str| Appointment {
            title: title.to_string(),
            client: client.to_string(),
            address: address.to_string(),
            when: when.to_string(),
        };

        Self {
            agent_name: agent_name.to_string(),
            standing: "Top 5 Agent".to_string(),
            kpis: vec![
                kpi(
                    "Monthly Commission",
                    "$45,850",
                    "+12% from last month",
                    KpiIcon::Dollar,
                    None,
                ),
                kpi(
                    "Active Listings",
                    "24",
                    "+4 from last month",
                    KpiIcon::Home,
                    Some(5),
                ),
                kpi(
                    "Client Base",
                    "156",
                    "+8 new this month",
                    KpiIcon::Users,
                    None,
                ),
                kpi(
                    "Conversion Rate",
                    "68%",
                    "+5% from last month",
                    KpiIcon::Trending,
                    None,
                ),
            ],
            appointments: vec![
                appointment(
                    "Property Viewing",
                    "John Smith",
                    "123 Main St",
                    "2:00 PM Today",
                ),
                appointment(
                    "Contract Signing",
                    "Sarah Johnson",
                    "456 Oak Ave",
                    "10:00 AM Tomorrow",
                ),
            ],
            achievements: vec![
                Achievement {
                    badge: AchievementBadge::Award,
                    title: "Top Performer Q1".to_string(),
                    detail: "Achieved $250K in sales".to_string(),
                },
                Achievement {
                    badge: AchievementBadge::Trophy,
                    title: "Rising Star".to_string(),
                    detail: "Top 5 in conversion rate".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeDirection;

    #[test]
    fn sample_overview_matches_agent_screen() {
        let overview = AgentOverview::sample("Agent Smith");
        assert_eq!(overview.greeting(), "Welcome back, Agent Smith");
        assert_eq!(overview.kpis.len(), 4);
        assert_eq!(overview.kpis[1].rank, Some(5));
        assert!(
            overview
                .kpis
                .iter()
                .all(|kpi| kpi.direction() == ChangeDirection::Up)
        );
        assert_eq!(
            overview.appointment_summary(),
            "You have 2 appointments today"
        );
    }

    #[test]
    fn appointment_summary_handles_singular() {
        let mut overview = AgentOverview::sample("Agent Smith");
        overview.appointments.truncate(1);
        assert_eq!(overview.appointment_summary(), "You have 1 appointment today");
        overview.appointments.clear();
        assert_eq!(overview.appointment_summary(), "No appointments scheduled");
    }
}
