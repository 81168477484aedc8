use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use hrdesk_core::{
    EmployeeCreate, EmployeeId, ErrorKind, HrServices, LeaveApplyRequest, LeavePolicy,
    MeetingCancelRequest, MeetingCreate, MeetingStatus, TicketCreate, TicketStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn employee(name: &str) -> EmployeeCreate {
    EmployeeCreate {
        name: name.to_string(),
        email: format!("{}@atliq.com", name.to_lowercase()),
        manager_id: None,
    }
}

#[test]
fn leave_scenario_from_seeded_balance() {
    let services = HrServices::new(LeavePolicy::strict());
    let e1 = services.directory.add(employee("Esme")).expect("add employee").emp_id;
    services.leave.set_balance(&e1, 5);

    services
        .leave
        .apply_leave(LeaveApplyRequest::new(e1.clone(), [date(2024, 1, 10), date(2024, 1, 11)]))
        .expect("apply leave");

    assert_eq!(services.leave.get_balance(&e1), Ok(3));
    assert_eq!(services.leave.get_history(&e1), vec![date(2024, 1, 10), date(2024, 1, 11)]);

    let error = services
        .leave
        .apply_leave(LeaveApplyRequest::new(
            e1.clone(),
            [date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 3), date(2024, 2, 4)],
        ))
        .expect_err("four days exceed the remaining three");
    assert_eq!(error.kind(), ErrorKind::InsufficientBalance);
    assert_eq!(services.leave.get_balance(&e1), Ok(3));
}

#[test]
fn onboarding_flow_touches_every_store() {
    let services = HrServices::new(LeavePolicy::with_default_allotment(20));
    services.seed().expect("seed");

    let manager = services.directory.search_by_name("daniel");
    assert_eq!(manager.len(), 1);
    let hire = services
        .directory
        .add(EmployeeCreate { manager_id: manager.first().cloned(), ..employee("Noor") })
        .expect("add hire");

    let laptop = services
        .tickets
        .create(TicketCreate {
            emp_id: hire.emp_id.clone(),
            item: "Laptop".to_string(),
            reason: "Onboarding".to_string(),
        })
        .expect("laptop ticket");
    services.tickets.update_status(&laptop.ticket_id, TicketStatus::Approved).expect("approve");

    let intro = date(2025, 3, 3).and_hms_opt(9, 30, 0).expect("valid time");
    services
        .meetings
        .schedule(MeetingCreate {
            emp_id: hire.emp_id.clone(),
            meeting_dt: intro,
            topic: "Introduction".to_string(),
        })
        .expect("schedule intro");
    let cancelled = services
        .meetings
        .cancel(MeetingCancelRequest { emp_id: hire.emp_id.clone(), meeting_dt: intro, topic: None })
        .expect("cancel intro");

    assert_eq!(cancelled.status, MeetingStatus::Cancelled);
    assert_eq!(services.leave.get_balance(&hire.emp_id), Ok(20));
    assert_eq!(
        services.tickets.list(&hire.emp_id, Some(TicketStatus::Approved)).len(),
        1,
        "approved laptop ticket should be listed"
    );
}

#[test]
fn concurrent_adds_issue_unique_increasing_ids() {
    let services = HrServices::new(LeavePolicy::strict());
    let directory = Arc::clone(&services.directory);

    let handles = (0..6)
        .map(|worker| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                (0..50)
                    .map(|n| {
                        directory
                            .add(employee(&format!("Worker{worker}-{n}")))
                            .expect("concurrent add")
                            .emp_id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let mut issued = HashSet::new();
    for handle in handles {
        let ids = handle.join().expect("worker panicked");
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "per-thread ids must increase");
        issued.extend(ids);
    }
    assert_eq!(issued.len(), 300);

    let stored = directory.list().into_iter().map(|record| record.emp_id).collect::<Vec<EmployeeId>>();
    assert!(stored.windows(2).all(|pair| pair[0] < pair[1]), "insertion order follows issuance");
}

#[test]
fn concurrent_leave_applications_never_overdraw() {
    let services = HrServices::new(LeavePolicy::strict());
    let emp_id = EmployeeId::new("E001");
    services.leave.set_balance(&emp_id, 10);

    let handles = (1..=20)
        .map(|day| {
            let ledger = Arc::clone(&services.leave);
            let emp_id = emp_id.clone();
            thread::spawn(move || {
                ledger.apply_leave(LeaveApplyRequest::new(emp_id, [date(2024, 3, day)])).is_ok()
            })
        })
        .collect::<Vec<_>>();

    let granted =
        handles.into_iter().map(|handle| handle.join().expect("worker panicked")).filter(|ok| *ok).count();
    assert_eq!(granted, 10);
    assert_eq!(services.leave.get_balance(&emp_id), Ok(0));
    assert_eq!(services.leave.get_history(&emp_id).len(), 10);
}
