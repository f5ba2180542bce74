//! Save-pipeline behavior against in-memory fake repositories.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use attendance_core::{
    AlwaysConfirm, AttendanceError, AttendanceRecord, AttendanceRepository, AttendanceSaver,
    AttendanceService, ConfirmPrompt, Employee, EmployeeRepository,
};

#[derive(Default)]
struct FakeAttendanceRepo {
    records: Mutex<Vec<AttendanceRecord>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl AttendanceRepository for FakeAttendanceRepo {
    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        let mut records = self.records.lock().unwrap();
        match record.id {
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                let saved = AttendanceRecord {
                    id: Some(*next),
                    ..record
                };
                records.push(saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let slot = records
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or_else(|| anyhow::anyhow!("no record with id {}", id))?;
                *slot = record.clone();
                Ok(record)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == Some(id))
            .cloned())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.work_date == date)
            .cloned()
            .collect())
    }

    async fn find_by_month(&self, year: i32, month: u32) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.work_date.format("%Y-%m").to_string() == format!("{:04}-{:02}", year, month))
            .cloned()
            .collect())
    }

    async fn find_by_employee_and_range(
        &self,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id && r.work_date >= from && r.work_date <= to)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != Some(id));
        Ok(records.len() < before)
    }
}

#[derive(Default)]
struct FakeEmployeeRepo {
    employees: Mutex<Vec<Employee>>,
}

impl FakeEmployeeRepo {
    fn with_employee(id: i64, name: &str) -> Arc<Self> {
        let repo = Self::default();
        repo.employees.lock().unwrap().push(Employee {
            id: Some(id),
            name: name.to_string(),
            rank: None,
            rrn: None,
            phone: None,
            hourly_wage: None,
            bank: None,
            account: None,
            address: None,
            contract_date: None,
            note: None,
        });
        Arc::new(repo)
    }
}

#[async_trait]
impl EmployeeRepository for FakeEmployeeRepo {
    async fn save(&self, employee: Employee) -> Result<Employee> {
        self.employees.lock().unwrap().push(employee.clone());
        Ok(employee)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn search_by_name(&self, name_like: &str) -> Result<Vec<Employee>> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name.contains(name_like))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != Some(id));
        Ok(employees.len() < before)
    }
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn record(employee_id: i64, date: NaiveDate, clock_in: NaiveTime, clock_out: NaiveTime) -> AttendanceRecord {
    AttendanceRecord {
        id: None,
        employee_id,
        work_date: date,
        clock_in: Some(clock_in),
        clock_out: Some(clock_out),
        memo: None,
    }
}

fn strict_service() -> AttendanceService {
    AttendanceService::new(
        Arc::new(FakeAttendanceRepo::default()),
        FakeEmployeeRepo::with_employee(7, "Kim"),
        true,
    )
}

#[tokio::test]
async fn rejects_zero_employee_id() {
    let service = strict_service();
    let err = service
        .upsert(record(0, d(1), t(9, 0), t(18, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::MissingField("employee_id")));
}

#[tokio::test]
async fn rejects_unknown_employee() {
    let service = strict_service();
    let err = service
        .upsert(record(99, d(1), t(9, 0), t(18, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::UnknownEmployee(99)));
}

#[tokio::test]
async fn rejects_equal_clock_times() {
    let service = strict_service();
    let err = service
        .upsert(record(7, d(1), t(9, 0), t(9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::ZeroDurationShift));
}

#[tokio::test]
async fn accepts_same_shift_on_consecutive_days() {
    let service = strict_service();
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();
    service.upsert(record(7, d(2), t(9, 0), t(18, 0))).await.unwrap();
}

#[tokio::test]
async fn rejects_overlap_in_strict_mode() {
    let service = strict_service();
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();

    let err = service
        .upsert(record(7, d(1), t(17, 0), t(20, 0)))
        .await
        .unwrap_err();
    match err {
        AttendanceError::OverlappingShift {
            work_date,
            clock_in,
            clock_out,
        } => {
            assert_eq!(work_date, d(1));
            assert_eq!(clock_in, t(9, 0));
            assert_eq!(clock_out, t(18, 0));
        }
        other => panic!("expected OverlappingShift, got {:?}", other),
    }
}

#[tokio::test]
async fn advisory_mode_skips_overlap_check() {
    let service = AttendanceService::new(
        Arc::new(FakeAttendanceRepo::default()),
        FakeEmployeeRepo::with_employee(7, "Kim"),
        false,
    );
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();
    service.upsert(record(7, d(1), t(17, 0), t(20, 0))).await.unwrap();
}

#[tokio::test]
async fn detects_overnight_shift_running_into_next_day() {
    let service = strict_service();
    service.upsert(record(7, d(1), t(22, 0), t(2, 0))).await.unwrap();

    // 01:00-05:00 the next day starts inside the overnight shift.
    let err = service
        .upsert(record(7, d(2), t(1, 0), t(5, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::OverlappingShift { .. }));

    // 03:00-05:00 the next day starts after it ends.
    service.upsert(record(7, d(2), t(3, 0), t(5, 0))).await.unwrap();
}

#[tokio::test]
async fn update_does_not_conflict_with_its_own_stored_version() {
    let service = strict_service();
    let saved = service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();

    let nudged = AttendanceRecord {
        clock_out: Some(t(18, 10)),
        ..saved
    };
    service.upsert(nudged).await.unwrap();
}

#[tokio::test]
async fn idempotent_update_keeps_field_values() {
    let service = strict_service();
    let mut saved = service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();
    saved.memo = Some("regular shift".into());

    let first = service.upsert(saved.clone()).await.unwrap();
    let second = service.upsert(saved).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(service.find(first.id.unwrap()).await.unwrap(), Some(second));
}

#[tokio::test]
async fn partial_shifts_never_conflict() {
    let service = strict_service();

    // Placeholder with no times, then a clock-in-only record on the same day.
    let placeholder = AttendanceRecord {
        clock_in: None,
        clock_out: None,
        ..record(7, d(1), t(0, 0), t(0, 0))
    };
    service.upsert(placeholder).await.unwrap();

    let open_shift = AttendanceRecord {
        clock_out: None,
        ..record(7, d(1), t(9, 0), t(18, 0))
    };
    service.upsert(open_shift).await.unwrap();

    // A complete shift saves alongside both partial ones.
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();
}

#[tokio::test]
async fn blank_memo_is_normalized_away() {
    let service = strict_service();
    let saved = service
        .upsert(AttendanceRecord {
            memo: Some("   ".into()),
            ..record(7, d(1), t(9, 0), t(18, 0))
        })
        .await
        .unwrap();
    assert_eq!(saved.memo, None);

    let trimmed = service
        .upsert(AttendanceRecord {
            id: None,
            memo: Some("  covered for Lee  ".into()),
            ..record(7, d(2), t(9, 0), t(18, 0))
        })
        .await
        .unwrap();
    assert_eq!(trimmed.memo.as_deref(), Some("covered for Lee"));
}

#[tokio::test]
async fn remove_deletes_and_reports_missing() {
    let service = strict_service();
    let saved = service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();
    let id = saved.id.unwrap();

    assert!(service.remove(id).await.unwrap());
    assert!(!service.remove(id).await.unwrap());
    assert_eq!(service.find(id).await.unwrap(), None);
}

// ── saver: advisory-mode entry flow ─────────────────────────────────────────

struct DenyAll;

impl ConfirmPrompt for DenyAll {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        false
    }
}

fn advisory_service() -> AttendanceService {
    AttendanceService::new(
        Arc::new(FakeAttendanceRepo::default()),
        FakeEmployeeRepo::with_employee(7, "Kim"),
        false,
    )
}

#[tokio::test]
async fn saver_asks_before_overnight_save() {
    let service = advisory_service();

    let saver = AttendanceSaver::new(&service, &DenyAll);
    let err = saver
        .save(7, d(1), t(22, 0), t(6, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::Cancelled(_)));

    let saver = AttendanceSaver::new(&service, &AlwaysConfirm);
    let saved = saver.save(7, d(1), t(22, 0), t(6, 0), None).await.unwrap();
    assert_eq!(saved.clock_in, Some(t(22, 0)));
    assert_eq!(saved.clock_out, Some(t(6, 0)));
}

#[tokio::test]
async fn saver_lets_operator_decline_overlapping_save() {
    let service = advisory_service();
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();

    let saver = AttendanceSaver::new(&service, &DenyAll);
    let err = saver
        .save(7, d(1), t(17, 0), t(20, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceError::Cancelled(_)));
}

#[tokio::test]
async fn saver_allows_overlap_override() {
    let service = advisory_service();
    service.upsert(record(7, d(1), t(9, 0), t(18, 0))).await.unwrap();

    let saver = AttendanceSaver::new(&service, &AlwaysConfirm);
    saver.save(7, d(1), t(17, 0), t(20, 0), None).await.unwrap();

    assert_eq!(service.by_date(d(1)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn saver_scan_sees_previous_days_overnight_shift() {
    let service = advisory_service();
    service.upsert(record(7, d(1), t(22, 0), t(2, 0))).await.unwrap();

    let saver = AttendanceSaver::new(&service, &AlwaysConfirm);
    let conflicts = saver.scan_conflicts(7, d(2), t(1, 0), t(5, 0)).await.unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].work_date, d(1));

    let clear = saver.scan_conflicts(7, d(2), t(3, 0), t(5, 0)).await.unwrap();
    assert!(clear.is_empty());
}
