//! Month calendar grid
//!
//! One cell per day with that day's spending. The grid starts on the
//! configured first day of the week, so the first row opens with blank
//! cells up to the 1st.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::ledger::Ledger;
use crate::models::{Money, MonthRef};

/// How heavy a day's spending is, used to shade its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpendIntensity {
    /// No expenses
    None,
    /// Up to 50
    Low,
    /// Over 50, up to 100
    Medium,
    /// Over 100
    High,
}

impl SpendIntensity {
    pub fn classify(expense_count: usize, total: Money) -> Self {
        if expense_count == 0 {
            Self::None
        } else if total > Money::from_units(100) {
            Self::High
        } else if total > Money::from_units(50) {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Single-character marker for the terminal grid
    pub fn marker(&self) -> char {
        match self {
            Self::None => ' ',
            Self::Low => '.',
            Self::Medium => '+',
            Self::High => '#',
        }
    }
}

/// One day of the calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub expense_count: usize,
    pub total: Money,
    pub intensity: SpendIntensity,
}

impl CalendarDay {
    pub fn has_expenses(&self) -> bool {
        self.expense_count > 0
    }
}

/// A month laid out as a calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub month: MonthRef,
    pub week_start: Weekday,
    /// Empty cells before the 1st in the first row
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn build(ledger: &Ledger, month: MonthRef, week_start: Weekday) -> Self {
        let days = month
            .days()
            .map(|date| {
                let expenses = ledger.daily_expenses(date);
                let total: Money = expenses.iter().map(|e| e.amount).sum();
                CalendarDay {
                    date,
                    expense_count: expenses.len(),
                    total,
                    intensity: SpendIntensity::classify(expenses.len(), total),
                }
            })
            .collect();

        Self {
            month,
            week_start,
            leading_blanks: offset_from(month.first_day().weekday(), week_start),
            days,
        }
    }

    pub fn day(&self, day_of_month: u32) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date.day() == day_of_month)
    }

    /// Number of grid rows needed to show the month
    pub fn weeks(&self) -> usize {
        (self.leading_blanks + self.days.len()).div_ceil(7)
    }

    /// Column headers starting at `week_start`
    pub fn weekday_headers(&self) -> Vec<&'static str> {
        let mut day = self.week_start;
        (0..7)
            .map(|_| {
                let name = short_name(day);
                day = day.succ();
                name
            })
            .collect()
    }

    /// Format the grid for terminal display
    ///
    /// Each cell shows the day number and an intensity marker; a count
    /// follows when a day has more than one expense.
    pub fn format_terminal(&self, symbol: &str) -> String {
        const CELL: usize = 7;

        let mut output = format!("{}\n", self.month);
        for header in self.weekday_headers() {
            output.push_str(&format!("{:<width$}", header, width = CELL));
        }
        output.push('\n');

        let mut column = 0;
        for _ in 0..self.leading_blanks {
            output.push_str(&" ".repeat(CELL));
            column += 1;
        }

        for day in &self.days {
            let cell = if day.expense_count > 1 {
                format!("{:>2}{}x{}", day.date.day(), day.intensity.marker(), day.expense_count)
            } else {
                format!("{:>2}{}", day.date.day(), day.intensity.marker())
            };
            output.push_str(&format!("{:<width$}", cell, width = CELL));
            column += 1;
            if column == 7 {
                output.truncate(output.trim_end_matches(' ').len());
                output.push('\n');
                column = 0;
            }
        }
        if column != 0 {
            output.truncate(output.trim_end_matches(' ').len());
            output.push('\n');
        }

        let total: Money = self.days.iter().map(|d| d.total).sum();
        output.push_str(&format!(
            "\nLegend: . up to {sym}50  + up to {sym}100  # over {sym}100\n",
            sym = symbol
        ));
        output.push_str(&format!("Month total: {}\n", total.format_with_symbol(symbol)));
        output
    }
}

fn offset_from(day: Weekday, week_start: Weekday) -> usize {
    ((day.num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7) as usize
}

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}
