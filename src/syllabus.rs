//! Syllabus and paper-setting rules for BSE Odisha Class X General Science.
//!
//! The chapter list is static. The rule block is rendered from `blueprint` so the
//! numbers the model is told always match what the schema, layout and validator expect.

use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::blueprint::{
  self, GeneratorConfig, COMPETENCY_PERCENT, EXAM_TIME, EXAM_TITLE, FULL_MARKS, MCQ_PER_SUBJECT,
  SECTION_MARKS, SUBJECTIVE_TIERS,
};

pub const PHYSICAL_SCIENCE_CHAPTERS: &[(&str, &str)] = &[
  ("Chemical Reactions and Equations", "Combination, Decomposition, Displacement, Double Displacement, Oxidation, Reduction, Corrosion, Rancidity."),
  ("Acids, Bases and Salts", "Properties, pH scale, Common salt chemicals (Bleaching powder, Baking soda, Washing soda, Plaster of Paris)."),
  ("Metals and Non-metals", "Physical/Chemical properties, Reactivity series, Ionic compounds, Metallurgy, Corrosion prevention."),
  ("Carbon and its Compounds", "Covalent bonding, Allotropes, Versatile nature, Saturated/Unsaturated, Homologous series, Nomenclature, Ethanol, Ethanoic Acid, Soaps/Detergents."),
  ("Periodic Classification", "Dobereiner, Newlands, Mendeleev, Modern Periodic Table (Trends in valency, atomic size, metallic properties)."),
  ("Light - Reflection and Refraction", "Spherical mirrors, Mirror formula, Refraction, Lenses, Lens formula, Power of lens."),
  ("The Human Eye and Colourful World", "Eye defects (Myopia, Hypermetropia), Prism refraction, Dispersion, Atmospheric refraction, Scattering (Tyndall effect)."),
  ("Electricity", "Current, Potential difference, Ohm's law, Resistance (Series/Parallel), Heating effect, Power."),
  ("Magnetic Effects of Electric Current", "Field lines, Current carrying conductor, Solenoid, Force on conductor, Electric motor, Induction, Generator, Domestic circuits."),
];

pub const LIFE_SCIENCE_CHAPTERS: &[(&str, &str)] = &[
  ("Nutrition", "Autotrophic (Photosynthesis), Heterotrophic, Human digestive system."),
  ("Respiration", "Aerobic/Anaerobic, Human respiratory system."),
  ("Transportation", "Transport in plants (Xylem/Phloem), Human circulatory system (Heart, Blood vessels)."),
  ("Excretion", "Excretion in plants, Human excretory system (Kidney, Nephron)."),
  ("Control and Coordination", "Plant hormones (Auxin, etc.), Human nervous system (Brain, Reflex arc), Endocrine glands (Hormones)."),
  ("Reproduction", "Asexual (Fission, Budding, Spore formation, Vegetative propagation), Sexual (Flowering plants, Human male/female reproductive systems), Reproductive health (HIV/AIDS)."),
  ("Heredity and Evolution", "Mendel's experiments, Sex determination, Evolution theories (Lamarck, Darwin)."),
  ("Energy Sources", "Renewable vs Non-renewable, Solar energy, Biogas."),
  ("Our Environment", "Ecosystem, Food chain/web, Energy flow, Ozone depletion, Waste management."),
  ("Management of Natural Resources", "Conservation of forest/wildlife, Water harvesting (Dams), Coal & Petroleum conservation."),
  ("Covid-19", "Virology, Symptoms, Management, Vaccination."),
];

/// Context block with the default difficulty/Bloom targets. Built once.
pub fn syllabus_context() -> &'static str {
  static CONTEXT: OnceLock<String> = OnceLock::new();
  CONTEXT.get_or_init(|| render_context(&GeneratorConfig::default()))
}

/// Full context block (setter persona, chapters, rules) for the given targets.
pub fn render_context(cfg: &GeneratorConfig) -> String {
  let mut out = String::with_capacity(4096);
  out.push_str("You are an expert question paper setter for Class X BSE Odisha Board.\n");
  out.push_str("The content is divided into two parts:\n");
  out.push_str("1. Physical Science (Bhoutika Bigyana)\n");
  out.push_str("2. Life Science (Jiba Bigyana)\n\n");

  push_chapters(&mut out, "Physical Science", PHYSICAL_SCIENCE_CHAPTERS);
  push_chapters(&mut out, "Life Science", LIFE_SCIENCE_CHAPTERS);
  out.push_str(&rules_text(cfg));
  out
}

fn push_chapters(out: &mut String, subject: &str, chapters: &[(&str, &str)]) {
  let _ = writeln!(out, "**{subject} Chapters & Key Concepts:**");
  for (i, (name, concepts)) in chapters.iter().enumerate() {
    let _ = writeln!(out, "{}. {}: {}", i + 1, name, concepts);
  }
  out.push('\n');
}

/// The "Question Paper Rules" block.
pub fn rules_text(cfg: &GeneratorConfig) -> String {
  let d = &cfg.difficulty_distribution;
  let b = &cfg.bloom_distribution;
  let mcq_total = 2 * MCQ_PER_SUBJECT;
  let subject_marks = blueprint::subjective_marks_per_subject();

  let mut out = String::new();
  out.push_str("**Question Paper Rules:**\n");
  let _ = writeln!(out, "- Exam Title: **{EXAM_TITLE}**");
  let _ = writeln!(out, "- Time: **{EXAM_TIME}**");
  let _ = writeln!(out, "- Total Marks: {FULL_MARKS}");
  let _ = writeln!(
    out,
    "- Section A (Objective): {SECTION_MARKS} Marks. {mcq_total} MCQs (1 mark each). Q1-Q{MCQ_PER_SUBJECT} Physical Science, Q{}-Q{mcq_total} Life Science.",
    MCQ_PER_SUBJECT + 1,
  );
  let _ = writeln!(out, "- Section B (Subjective): {SECTION_MARKS} Marks.");
  for (part, subject) in [(1, "Physical Science"), (2, "Life Science")] {
    let _ = writeln!(out, "  - Part {part}: {subject} ({subject_marks} Marks).");
    for tier in SUBJECTIVE_TIERS {
      let _ = writeln!(
        out,
        "    - {} Questions of {} marks each (with internal OR choice).",
        tier.count, tier.marks
      );
    }
  }
  out.push_str("- **CRITICAL RULE FOR SUBJECTIVE:** For every subjective question with an internal \"OR\" choice, the alternative question MUST be from a DIFFERENT chapter than the main question. Do not ask two questions from the same chapter in one \"OR\" set.\n");
  let _ = writeln!(
    out,
    "- **CRITICAL RULE FOR MCQs:** {COMPETENCY_PERCENT}% of the MCQs must be COMPETENCY-BASED. These should be longer questions involving scenarios, application of concepts, or reasoning, rather than simple definitions. The options should be plausible and detailed."
  );
  let _ = writeln!(
    out,
    "- Difficulty: {}% Easy, {}% Moderate, {}% Difficult.",
    d.easy, d.moderate, d.difficult
  );
  let _ = writeln!(
    out,
    "- Bloom's: {}% Knowledge, {}% Comprehension, {}% Application, {}% Evaluation.",
    b.knowledge, b.comprehension, b.application, b.evaluation
  );
  out.push_str("- Language: ODIA (Use Unicode Odia script).\n");
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn context_lists_every_chapter() {
    let ctx = syllabus_context();
    for (name, _) in PHYSICAL_SCIENCE_CHAPTERS.iter().chain(LIFE_SCIENCE_CHAPTERS) {
      assert!(ctx.contains(name), "missing chapter {name}");
    }
    assert!(ctx.contains("11. Covid-19"));
  }

  #[test]
  fn rules_follow_the_blueprint() {
    let rules = rules_text(&GeneratorConfig::default());
    assert!(rules.contains("50 MCQs (1 mark each). Q1-Q25 Physical Science, Q26-Q50 Life Science."));
    assert!(rules.contains("4 Questions of 2 marks each"));
    assert!(rules.contains("3 Questions of 3 marks each"));
    assert!(rules.contains("2 Questions of 4 marks each"));
    assert!(rules.contains("Part 2: Life Science (25 Marks)"));
    assert!(rules.contains("25% Easy, 50% Moderate, 25% Difficult"));
    assert!(rules.contains("ODIA"));
  }

  #[test]
  fn custom_distribution_is_rendered() {
    let mut cfg = GeneratorConfig::default();
    cfg.difficulty_distribution.easy = 40;
    cfg.difficulty_distribution.moderate = 40;
    cfg.difficulty_distribution.difficult = 20;
    assert!(render_context(&cfg).contains("40% Easy, 40% Moderate, 20% Difficult"));
  }
}
