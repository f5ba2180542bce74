use std::sync::Arc;

use crate::database::models::Employee;
use crate::error::AttendanceError;
use crate::ports::EmployeeRepository;

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn upsert(&self, employee: Employee) -> Result<Employee, AttendanceError> {
        let name = match trim_to_none(Some(employee.name.clone())) {
            Some(name) => name,
            None => return Err(AttendanceError::MissingField("name")),
        };

        // Phone is stored digits-only; display formatting is the UI's problem.
        let sanitized = Employee {
            name,
            phone: normalize_phone(employee.phone.as_deref()),
            rrn: trim_to_none(employee.rrn),
            bank: trim_to_none(employee.bank),
            account: trim_to_none(employee.account),
            address: trim_to_none(employee.address),
            note: trim_to_none(employee.note),
            ..employee
        };

        Ok(self.repo.save(sanitized).await?)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Employee>, AttendanceError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AttendanceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Employee>, AttendanceError> {
        Ok(self.repo.search_by_name(query.trim()).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<bool, AttendanceError> {
        Ok(self.repo.delete_by_id(id).await?)
    }
}

fn trim_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn normalize_phone(phone: Option<&str>) -> Option<String> {
    let digits: String = phone?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_keeps_digits_only() {
        assert_eq!(normalize_phone(Some("010-1234-5678")), Some("01012345678".into()));
        assert_eq!(normalize_phone(Some(" (02) 123 456 ")), Some("02123456".into()));
        assert_eq!(normalize_phone(Some("---")), None);
        assert_eq!(normalize_phone(None), None);
    }

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(trim_to_none(Some("  ".into())), None);
        assert_eq!(trim_to_none(Some(" Kim ".into())), Some("Kim".into()));
    }
}
