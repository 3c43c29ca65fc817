use std::sync::Arc;

use tracing::debug;

use super::join_interests;
use crate::domain::{DomainError, TextGenerator};

const INSTRUCTIONS: &str = "You are a local knowledge expert. Provide cultural insights, safety \
tips, local transportation, authentic experiences, customs, tipping practices, emergency \
contacts, useful phrases, and common scams. Help travelers feel confident and respectful in \
their destination.";

const FALLBACK_KNOWLEDGE: &str = "Unable to generate local knowledge.";

const SECTIONS: &str = "Please provide:

1. CULTURAL INSIGHTS:
   - Local customs and etiquette
   - Dress codes and cultural sensitivity
   - Tipping practices and expectations

2. SAFETY & PRACTICAL INFO:
   - General safety tips
   - Areas to be cautious of (if any)
   - Emergency numbers (police, ambulance, fire)
   - Nearest embassy/consulate information

3. TRANSPORTATION:
   - How to get around (public transit, taxis, etc.)
   - Transportation apps or cards to download
   - Typical costs

4. LOCAL FAVORITES:
   - Hidden gems and local spots
   - Authentic experiences beyond tourist areas
   - Local food specialties to try

5. COMMUNICATION:
   - Common phrases in the local language
   - English availability
   - Useful translation apps

6. PRACTICAL TIPS:
   - Best areas to stay
   - When shops/restaurants typically open/close
   - Common scams to watch out for
   - Cell phone/data options";

/// Culture, safety and practical tips for a destination
#[derive(Debug, Clone)]
pub struct LocalKnowledgeAgent {
    generator: Arc<dyn TextGenerator>,
}

impl LocalKnowledgeAgent {
    pub const AGENT_TYPE: &'static str = "LocalKnowledge";

    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn local_knowledge(
        &self,
        destination: &str,
        interests: &[String],
        special_requests: Option<&str>,
    ) -> Result<String, DomainError> {
        let prompt = build_prompt(destination, interests, special_requests);

        debug!(destination, agent = Self::AGENT_TYPE, "Requesting local knowledge");

        let answer = self.generator.generate(INSTRUCTIONS, &prompt).await?;
        Ok(answer.unwrap_or_else(|| FALLBACK_KNOWLEDGE.to_string()))
    }
}

fn build_prompt(destination: &str, interests: &[String], special_requests: Option<&str>) -> String {
    let interests = join_interests(interests);
    let special = special_requests
        .map(|r| format!("SPECIAL REQUESTS: {}", r))
        .unwrap_or_default();

    format!(
        "Provide comprehensive local knowledge for {destination}:\n\
         \n\
         TRAVELER INTERESTS: {interests}\n\
         {special}\n\
         \n\
         {SECTIONS}\n\
         \n\
         Tailor advice to their interests: {interests}"
    )
}
