//! Instruction payload sent to the generative service.
//!
//! Every user item is embedded verbatim. The tone policy forbids mystical and
//! clinical language, and the plan section requires a number in each
//! objective.

use crate::domain::models::{Bucket, UserInput};

const ROLE: &str = "Act as a HumanLab expert: a radical, rational and operational life strategist.";

const TONE_POLICY: &str = "\
TONE (CRITICAL):
- FORBIDDEN: mystical poetry (\"architect of the living\", \"soul of the flowers\"), New Age jargon, \
divine emphasis (\"You are the saviour of...\").
- FORBIDDEN: clinical or psychological terms (depression, trauma, impostor syndrome).
- REQUIRED: be CONCRETE, BUSINESS-MINDED and BEHAVIOURAL.
- Write like a senior partner: charismatic but grounded. Balance inspiration with rationality.";

const INSTRUCTIONS: &str = "\
SPECIFIC INSTRUCTIONS:

1. STRATEGIC ANALYSIS:
   - Do not say \"You are the magician of X\". Say \"Your positioning is that of an expert in X\".
   - Avoid superlatives. Stay accurate.

2. RISKS (category \"Personal\") - SAFETY:
   - NEVER state a diagnosis (no \"burn-out\", \"anxiety\", \"impostor\").
   - Talk about BEHAVIOUR and SITUATION.
   - Example: instead of \"impostor syndrome\", write \"Tendency to undervalue your technical expertise\".
   - Example: instead of \"risk of depression\", write \"Energy drop linked to solo-founder isolation\".

3. ACTION PLAN (timeline) - SUCCESS MEASURES:
   - Every objective MUST contain a NUMBER (KPI).
   - Bad: \"Validate the idea\".
   - Good: \"Collect 3 qualitative answers from prospects\".
   - Good: \"Run 5 discovery interviews\".

4. SCORES:
   - Score severely (0 to 10, integers only). The overall score is computed automatically; \
keep the sub-scores consistent with each other.

STRICT JSON FORMAT:";

fn join(items: &[String]) -> String {
    items.join(", ")
}

/// Build the natural-language prompt for `input`.
pub fn build_prompt(input: &UserInput) -> String {
    format!(
        "{ROLE}\n\n\
         {TONE_POLICY}\n\n\
         USER DATA:\n\
         1. LOVES: {love}\n\
         2. GOOD AT: {good_at}\n\
         3. WORLD NEEDS: {needs}\n\
         4. PAID FOR: {paid}\n\n\
         HUMAN CONTEXT:\n\
         - Values: {values}\n\
         - Constraints: {constraints}\n\
         - Energy: {energy}/5\n\n\
         {INSTRUCTIONS}",
        love = join(input.bucket(Bucket::Love)),
        good_at = join(input.bucket(Bucket::GoodAt)),
        needs = join(input.bucket(Bucket::Needs)),
        paid = join(input.bucket(Bucket::Paid)),
        values = join(input.values()),
        constraints = join(input.constraints()),
        energy = input.energy_level(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> UserInput {
        let mut input = UserInput::new();
        input.add_item(Bucket::Love, "woodworking");
        input.add_item(Bucket::Love, "hiking");
        input.add_item(Bucket::GoodAt, "project management");
        input.add_item(Bucket::Paid, "consulting");
        input.add_item(Bucket::Needs, "sustainable housing");
        input.add_value("autonomy");
        input.add_constraint("mortgage");
        input.set_energy_level(4).unwrap();
        input
    }

    #[test]
    fn test_prompt_embeds_every_item() {
        let prompt = build_prompt(&sample_input());
        assert!(prompt.contains("1. LOVES: woodworking, hiking"));
        assert!(prompt.contains("2. GOOD AT: project management"));
        assert!(prompt.contains("3. WORLD NEEDS: sustainable housing"));
        assert!(prompt.contains("4. PAID FOR: consulting"));
        assert!(prompt.contains("- Values: autonomy"));
        assert!(prompt.contains("- Constraints: mortgage"));
        assert!(prompt.contains("- Energy: 4/5"));
    }

    #[test]
    fn test_prompt_carries_tone_policy() {
        let prompt = build_prompt(&sample_input());
        assert!(prompt.contains("mystical"));
        assert!(prompt.contains("clinical"));
        assert!(prompt.contains("NUMBER (KPI)"));
        assert!(prompt.contains("Score severely"));
    }

    #[test]
    fn test_empty_constraints_render_blank() {
        let mut input = sample_input();
        input.remove_constraint(0).unwrap();
        let prompt = build_prompt(&input);
        assert!(prompt.contains("- Constraints: \n"));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = build_prompt(&sample_input());
        let role = prompt.find("HumanLab").unwrap();
        let data = prompt.find("USER DATA:").unwrap();
        let context = prompt.find("HUMAN CONTEXT:").unwrap();
        let format = prompt.find("STRICT JSON FORMAT:").unwrap();
        assert!(role < data && data < context && context < format);
        assert!(prompt.contains("- Energy: 4/5\n\nSPECIFIC INSTRUCTIONS:"));
    }
}
