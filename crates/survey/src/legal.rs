use chrono::{Datelike, NaiveDate};

/// Marker stored under the legal record once the terms are accepted.
pub const ACCEPTED_MARKER: &str = "accepted";

/// Terms of service, mutual NDA, EULA and disclaimer shown before the
/// survey opens, stamped with `today`.
pub fn agreement_text(today: NaiveDate) -> String {
    format!(
        "Terms of Service & Mutual Non-Disclosure Agreement
Last Updated: {date}

By accepting, you are entering into a binding legal agreement with AIWinLab and its principal, William Russell Wheeler (\"The Company\").

1. Mutual Non-Disclosure (NDA)
Both parties agree to treat all information shared through this tool as confidential. The Company will not share your survey responses with any third party. You (\"The User\") agree not to disclose, copy, or distribute the proprietary frameworks, questions, or generated report structures provided by this tool.

2. End User License Agreement (EULA) & Intellectual Property
The Company grants you a limited, non-exclusive, non-transferable, revocable license to use the AIWinLab assessment tool for your internal business evaluation purposes only. All content, structures, prompts, branding, and methodologies within this tool are the exclusive intellectual property of The Company. You agree not to reverse-engineer, decompile, create derivative works from, or otherwise attempt to steal the intellectual property of this system. You are expressly forbidden from using this tool to create a competing product or service.

3. Disclaimer of Warranties & Limitation of Liability
This tool is provided \"as is,\" without any warranties of any kind. The Company does not guarantee any specific business outcome, revenue increase, or result from the use of the generated reports. The recommendations provided are for informational purposes only. The User is solely responsible for the implementation and consequences of any actions taken based on the report. The Company's liability for any claim arising out of this agreement shall not exceed the amount paid for the service.

4. Governing Law
This agreement shall be governed by the laws of the jurisdiction in which The Company is registered.

Copyright \u{a9} {year} AIWinLab / William Russell Wheeler. All Rights Reserved.",
        date = today.format("%B %-d, %Y"),
        year = today.year(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_date_and_year() {
        let text = agreement_text(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        assert!(text.contains("Last Updated: March 7, 2026"));
        assert!(text.contains("Copyright \u{a9} 2026 AIWinLab"));
    }
}
