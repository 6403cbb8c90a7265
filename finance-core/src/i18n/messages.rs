use serde::{Deserialize, Serialize};

use super::Locale;

/// Every user-visible message the core can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    DivisionByZero,
    InvalidFormat,
    Overflow,
    Uncategorized,
    Other,
    Income,
    Expense,
    Balance,
    Transactions,
    NoTransactions,
    AppliedAmount,
}

impl MessageKey {
    pub const ALL: [MessageKey; 11] = [
        MessageKey::DivisionByZero,
        MessageKey::InvalidFormat,
        MessageKey::Overflow,
        MessageKey::Uncategorized,
        MessageKey::Other,
        MessageKey::Income,
        MessageKey::Expense,
        MessageKey::Balance,
        MessageKey::Transactions,
        MessageKey::NoTransactions,
        MessageKey::AppliedAmount,
    ];

    /// Whether the message describes a failed calculation rather than a label.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DivisionByZero | Self::InvalidFormat | Self::Overflow
        )
    }
}

/// Looks up catalog strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn translate(
        &self,
        key: MessageKey,
    ) -> &'static str {
        match self.locale {
            Locale::En => english(key),
            Locale::Es => spanish(key),
            Locale::Ru => russian(key),
        }
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::DivisionByZero => "Cannot divide by zero",
        MessageKey::InvalidFormat => "Invalid number format",
        MessageKey::Overflow => "Result is too large",
        MessageKey::Uncategorized => "Uncategorized",
        MessageKey::Other => "Other",
        MessageKey::Income => "Income",
        MessageKey::Expense => "Expenses",
        MessageKey::Balance => "Balance",
        MessageKey::Transactions => "Transactions",
        MessageKey::NoTransactions => "No transactions for this period",
        MessageKey::AppliedAmount => "Applied amount",
    }
}

fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::DivisionByZero => "No se puede dividir entre cero",
        MessageKey::InvalidFormat => "Formato de número no válido",
        MessageKey::Overflow => "El resultado es demasiado grande",
        MessageKey::Uncategorized => "Sin categoría",
        MessageKey::Other => "Otros",
        MessageKey::Income => "Ingresos",
        MessageKey::Expense => "Gastos",
        MessageKey::Balance => "Saldo",
        MessageKey::Transactions => "Transacciones",
        MessageKey::NoTransactions => "No hay transacciones en este periodo",
        MessageKey::AppliedAmount => "Importe aplicado",
    }
}

fn russian(key: MessageKey) -> &'static str {
    match key {
        MessageKey::DivisionByZero => "Деление на ноль невозможно",
        MessageKey::InvalidFormat => "Неверный формат числа",
        MessageKey::Overflow => "Слишком большое число",
        MessageKey::Uncategorized => "Без категории",
        MessageKey::Other => "Прочее",
        MessageKey::Income => "Доходы",
        MessageKey::Expense => "Расходы",
        MessageKey::Balance => "Баланс",
        MessageKey::Transactions => "Транзакции",
        MessageKey::NoTransactions => "Нет транзакций за этот период",
        MessageKey::AppliedAmount => "Применённая сумма",
    }
}
