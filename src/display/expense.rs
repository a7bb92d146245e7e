//! Expense display formatting

use super::DisplayStyle;
use crate::models::{Expense, ExpenseCategory};

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, style: &DisplayStyle) -> String {
    format!(
        "{:>14} {:10} {:14} {:>12}  {}",
        expense.id.get(),
        style.date(expense.date),
        truncate(&category_display(expense), 14),
        style.money(expense.amount),
        truncate(&expense.note, 30)
    )
}

/// Format a list of expenses, in the order given
pub fn format_expense_list(expenses: &[Expense], style: &DisplayStyle) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>14} {:10} {:14} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, style));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, style: &DisplayStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", style.date(expense.date)));
    output.push_str(&format!("Amount:      {}\n", style.money(expense.amount)));
    output.push_str(&format!("Category:    {}\n", category_display(expense)));

    if !expense.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", expense.note));
    }

    output
}

/// Known categories by name; unknown labels as `Other (label)`
fn category_display(expense: &Expense) -> String {
    if expense.has_known_category() {
        expense.kind().to_string()
    } else {
        format!("{} ({})", ExpenseCategory::Other, expense.category)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
