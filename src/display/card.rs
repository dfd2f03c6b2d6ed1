//! Card bill display formatting
//!
//! Active bills are listed first with their outstanding amount, then the
//! bills that are fully paid.

use super::format::{check_mark, separator, truncate};
use crate::reports::{CardGroup, CardGroupOrder};

const WIDTH: usize = 56;

/// Format one card's bill with its charges
pub fn format_card_group(group: &CardGroup, symbol: &str) -> String {
    let mut output = String::new();
    let status = if group.all_paid { " (paid)" } else { "" };
    output.push_str(&format!(
        "{:<38}{:>18}\n",
        format!("{}{}", truncate(&group.card_name, 30), status),
        group.displayed_total().format_with_symbol(symbol)
    ));

    if group.items.is_empty() {
        output.push_str("  (no charges)\n");
        return output;
    }

    for item in &group.items {
        let description = if item.description.is_empty() {
            item.expression.as_str()
        } else {
            item.description.as_str()
        };
        output.push_str(&format!(
            "  {} {:<28} {:>14}  {}\n",
            check_mark(item.is_checked),
            truncate(description, 28),
            item.amount.format_with_symbol(symbol),
            item.id
        ));
    }

    if group.grand_total != group.total && !group.all_paid {
        output.push_str(&format!(
            "  {:<32} {:>14}\n",
            "Total incl. paid",
            group.grand_total.format_with_symbol(symbol)
        ));
    }

    output
}

/// Format a month's card bills
pub fn format_card_groups(order: &CardGroupOrder, month: &str, symbol: &str) -> String {
    let mut output = format!("Card bills for {}\n", month);
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if order.is_empty() {
        output.push_str("No card charges found.\n");
        return output;
    }

    for group in &order.active {
        output.push_str(&format_card_group(group, symbol));
    }

    if !order.paid.is_empty() {
        output.push_str(&separator(WIDTH));
        output.push_str("\nPaid\n");
        for group in &order.paid {
            output.push_str(&format_card_group(group, symbol));
        }
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<38}{:>18}\n",
        "Outstanding",
        order.outstanding().format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardExpense;
    use crate::reports::{group_cards, include_cards, order_groups};

    #[test]
    fn test_active_before_paid() {
        let mut paid = CardExpense::new("Amex", "March 2025", "Flight", "900");
        paid.is_checked = true;
        let expenses = vec![
            CardExpense::new("HDFC", "March 2025", "Groceries", "120 + 30"),
            paid,
        ];

        let order = order_groups(group_cards(&expenses, "Mar 2025"));
        let output = format_card_groups(&order, "March 2025", "₹");

        assert!(output.contains("[ ] Groceries"));
        assert!(output.contains("Amex (paid)"));
        assert!(output.find("HDFC").unwrap() < output.find("Amex").unwrap());
        assert!(output.contains("₹150.00"));
    }

    #[test]
    fn test_empty_card_listed() {
        let mut groups = group_cards(&[], "March 2025");
        let cards = vec!["ICICI".to_string()];
        include_cards(&mut groups, &cards);

        let output = format_card_groups(&order_groups(groups), "March 2025", "₹");
        assert!(output.contains("ICICI"));
        assert!(output.contains("(no charges)"));
    }

    #[test]
    fn test_no_groups() {
        let output = format_card_groups(&CardGroupOrder::default(), "March 2025", "₹");
        assert!(output.contains("No card charges found"));
    }
}
