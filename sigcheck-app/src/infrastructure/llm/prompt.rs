pub fn build_verification_prompt() -> String {
    r#"I will provide you with two signature images. Your task is to analyze both signatures and determine whether they were made by the same person or by two different individuals. This verification is intended for high-stakes use in the banking sector, where signature-based fraud prevention is critical.

Please ensure your analysis is as accurate as possible, considering all professional-level forensic signature analysis techniques, such as:
- Line quality
- Stroke order
- Pen pressure consistency
- Signature rhythm and speed
- Angle and slant
- Spacing and alignment
- Signature proportions and size consistency
- Natural variation vs. forgery indicators
- Tremors, hesitation, and unnatural stops

Also, compare the behavioral biometric elements of handwriting if detectable. If there are differences, explain whether they can be attributed to natural variation (as often seen in genuine signatures) or if they suggest deliberate forgery.

Use best practices followed by forensic document examiners and handwriting experts in real-world financial institutions. Assume this verification will be used as legal or compliance evidence, so accuracy, completeness, and professional explanation are critical. Analyze from every angle and cross-check with all known scientific and forensic signature verification methods.

Only proceed if you are capable of checking with maximum reliability, minimizing false positives and false negatives, and clearly stating the level of certainty.

Give your response with only the following:

Match Status: "Same Person" or "Different People"

Confidence Level: (percentage)

Reasoning: (a short, clear summary of why you made the determination)

Do not include any instructions, disclaimers, or explanations about your process. Only provide the core findings in a concise and professional tone suitable for forensic banking use."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mandates_report_format() {
        let prompt = build_verification_prompt();
        assert!(prompt.contains("Match Status:"));
        assert!(prompt.contains("Confidence Level:"));
        assert!(prompt.contains("Reasoning:"));
    }
}
