// Prompts for the two model round trips: classification, then the insights report.

pub const INVALID_TOKEN: &str = "INVALID";

pub const VALIDATION_PROMPT: &str = r#"
You are a validator. Check if the following text is a **bank statement or UPI statement**.
If YES → reply with only "VALID".
If NO → reply with only "INVALID".

Text:
{text}
"#;

pub const INSIGHTS_PROMPT: &str = r#"
You are a financial advisor AI. Analyze the following **bank statement (not just UPI)**:

{text}

Provide insights in this format:
**Financial Insights for {filename}**
- **Total Income**: ₹[amount]
- **Total Expenses**: ₹[amount]
- **Savings**: ₹[amount] ([percentage] %)
- **Top Spending Categories**: [category: amount]
- **Category-wise Summary**: [Food: ₹x, Travel: ₹y, Shopping: ₹z, etc.]
- **Time-based Spending Trends**: [monthly or weekly breakdown if visible]
- **Wasteful Transactions Detected**: [list suspicious/unnecessary spends]
- **Spending Patterns**: [short overall summary of habits]
- **Recommendations**: [advice for budgeting, where to minimize, where spending is healthy]
"#;

pub fn validation_prompt(text: &str) -> String {
    fill(VALIDATION_PROMPT, &[("{text}", text)])
}

pub fn insights_prompt(text: &str, filename: &str) -> String {
    fill(INSIGHTS_PROMPT, &[("{text}", text), ("{filename}", filename)])
}

/// Substitutes placeholders in a single left-to-right pass over the template, so
/// values that themselves contain a placeholder are inserted verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
