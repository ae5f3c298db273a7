//! Integration tests for the service desk domain service

use service_desk::contract::*;

mod common;
use common::{
    create_test_service, money, new_client, new_fridge, new_part, print_test_header, seed_order,
};

// ===== Clients =====

#[tokio::test]
async fn test_upsert_client_twice_keeps_one_row() {
    print_test_header(
        "test_upsert_client_twice_keeps_one_row",
        &["Upserting by national id overwrites the existing client instead of duplicating it"],
    );
    let h = create_test_service();

    println!("📝 Stage 1: First upsert");
    let first = h
        .service
        .upsert_client(new_client("1712345678", "Maria Perez"))
        .await
        .unwrap();

    println!("📝 Stage 2: Second upsert with the same national id");
    let mut second_payload = new_client("1712345678", "María Pérez de Vera");
    second_payload.email = Some("MARIA@Example.com".to_string());
    second_payload.category = ClientCategory::Premium;
    let second = h.service.upsert_client(second_payload).await.unwrap();

    println!("📝 Stage 3: Verify a single row carrying the second payload");
    assert_eq!(h.clients.count(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.full_name, "María Pérez de Vera");
    assert_eq!(second.email.as_deref(), Some("maria@example.com"));
    assert_eq!(second.category, ClientCategory::Premium);
    println!("   ✓ one client, updated in place");
}

#[tokio::test]
async fn test_upsert_client_rejects_invalid_national_id() {
    print_test_header(
        "test_upsert_client_rejects_invalid_national_id",
        &["A national id without digits is a validation error"],
    );
    let h = create_test_service();

    let err = h
        .service
        .upsert_client(new_client("ABC", "Sin Cedula"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceDeskError::Validation { .. }));
    assert_eq!(h.clients.count(), 0);
}

#[tokio::test]
async fn test_delete_client_with_orders_is_refused() {
    print_test_header(
        "test_delete_client_with_orders_is_refused",
        &["Clients referenced by service orders cannot be deleted"],
    );
    let h = create_test_service();
    let (client, _, _) = seed_order(&h.service, "20.00").await;

    let err = h.service.delete_client(client.id).await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Conflict { .. }));

    println!("📝 A client without orders can be deleted");
    let lonely = h
        .service
        .upsert_client(new_client("0912345678", "Luis Vera"))
        .await
        .unwrap();
    h.service.delete_client(lonely.id).await.unwrap();
    assert!(matches!(
        h.service.get_client(lonely.id).await,
        Err(ServiceDeskError::NotFound { .. })
    ));
}

// ===== Spreadsheet import =====

#[tokio::test]
async fn test_csv_import_skips_rows_without_cedula_or_nombre() {
    print_test_header(
        "test_csv_import_skips_rows_without_cedula_or_nombre",
        &[
            "Rows lacking Cedula or Nombre are skipped and counted",
            "Rows with an invalid Cedula are reported as errors",
        ],
    );
    let h = create_test_service();

    let sheet = "Cedula,Nombre,Telefono,Email,Direccion,Categoria\n\
                 1712345678,María Pérez,0991111111,maria@example.com,Quito,Premium\n\
                 ,Sin Cedula,0992222222,,,\n\
                 1700000002,,0993333333,,,\n\
                 0912345678,Luis Vera,,,,VIP\n\
                 XYZ,Cedula Rota,,,,\n";

    println!("📝 Stage 1: Import");
    let report = h.service.import_clients_csv(sheet.as_bytes()).await.unwrap();
    println!("   report: {:?}", report);

    println!("📝 Stage 2: Verify counts");
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(h.clients.count(), 2);

    println!("📝 Stage 3: Unknown category falls back to REGULAR");
    let luis = h.service.list_clients(Some("vera")).await.unwrap();
    assert_eq!(luis.len(), 1);
    assert_eq!(luis[0].category, ClientCategory::Regular);

    assert!(h.events.names().contains(&"clients_imported"));
}

#[tokio::test]
async fn test_csv_import_is_idempotent() {
    print_test_header(
        "test_csv_import_is_idempotent",
        &["Importing the same sheet twice updates rather than duplicates"],
    );
    let h = create_test_service();
    let sheet = b"Cedula,Nombre\n1712345678,Maria Perez\n";

    h.service.import_clients_csv(sheet).await.unwrap();
    let report = h.service.import_clients_csv(sheet).await.unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(h.clients.count(), 1);
}

// ===== Status workflow =====

#[tokio::test]
async fn test_order_intake_writes_initial_history() {
    print_test_header(
        "test_order_intake_writes_initial_history",
        &["A new order is PENDING with a numbered id and an intake history row"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "25.00").await;

    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.order_number.starts_with("OS-"));
    assert_eq!(order.order_number.len(), "OS-20250101-ABCDEF".len());
    assert_eq!(order.total_cost, money("25.00"));

    let history = h.service.status_history(order.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_from, None);
    assert_eq!(history[0].status_to, OrderStatus::Pending);

    let by_number = h
        .service
        .get_order_by_number(&order.order_number)
        .await
        .unwrap();
    assert_eq!(by_number.id, order.id);
}

#[tokio::test]
async fn test_status_transitions_append_history() {
    print_test_header(
        "test_status_transitions_append_history",
        &[
            "Every accepted transition appends a history row with its author",
            "Terminal statuses are final",
        ],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "10.00").await;
    let author = uuid::Uuid::new_v4();

    let path = [
        OrderStatus::Diagnosis,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Delivered,
    ];

    println!("📝 Stage 1: Walk the order to DELIVERED");
    for to in path {
        h.service
            .change_status(
                order.id,
                StatusChange {
                    to,
                    changed_by_id: Some(author),
                    notes: Some(format!("→ {}", to)),
                },
            )
            .await
            .unwrap();
    }

    println!("📝 Stage 2: Verify history, oldest first");
    let history = h.service.status_history(order.id).await.unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[1].status_from, Some(OrderStatus::Pending));
    assert_eq!(history[1].status_to, OrderStatus::Diagnosis);
    assert_eq!(history[4].status_to, OrderStatus::Delivered);
    assert!(history[1..].iter().all(|h| h.changed_by_id == Some(author)));

    println!("📝 Stage 3: DELIVERED is final");
    let err = h
        .service
        .change_status(
            order.id,
            StatusChange {
                to: OrderStatus::InProgress,
                changed_by_id: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceDeskError::InvalidTransition { .. }));
    assert_eq!(h.service.status_history(order.id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_delivery_requires_finished_work() {
    print_test_header(
        "test_delivery_requires_finished_work",
        &["DELIVERED is only reachable from COMPLETED or READY"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "10.00").await;

    let err = h
        .service
        .change_status(
            order.id,
            StatusChange {
                to: OrderStatus::Delivered,
                changed_by_id: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceDeskError::InvalidTransition {
            from: "PENDING".to_string(),
            to: "DELIVERED".to_string(),
        }
    );
}

#[tokio::test]
async fn test_status_change_without_history_is_rolled_back() {
    print_test_header(
        "test_status_change_without_history_is_rolled_back",
        &["A status change whose audit row cannot be written does not stick"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "10.00").await;

    h.history.fail_next_append();
    let err = h
        .service
        .change_status(
            order.id,
            StatusChange {
                to: OrderStatus::Diagnosis,
                changed_by_id: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err, ServiceDeskError::Internal);
    let order = h.service.get_order(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(h.service.status_history(order.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stale_writes_do_not_reopen_closed_orders() {
    print_test_header(
        "test_stale_writes_do_not_reopen_closed_orders",
        &[
            "An order cancelled between read and write keeps its CANCELLED status",
            "Stock taken for the rejected item is put back",
        ],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "10.00").await;
    let part = h.service.upsert_part(new_part("CAP-3", 5, "9.00")).await.unwrap();

    println!("📝 Stage 1: Diagnosis races a cancellation");
    h.orders.change_status_after_next_read(OrderStatus::Cancelled);
    let err = h
        .service
        .record_diagnosis(order.id, "Capacitor dañado")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceDeskError::Conflict { .. }));
    let stored = h.orders.stored(order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert_eq!(stored.diagnosis, None);

    println!("📝 Stage 2: Adding an item races a cancellation");
    let equipment = h
        .service
        .register_equipment(order.client_id, new_fridge())
        .await
        .unwrap();
    let second = h
        .service
        .create_order(
            NewServiceOrder {
                client_id: order.client_id,
                equipment_id: equipment.id,
                technician_id: None,
                reported_issue: None,
                labor_cost: money("0"),
                is_warranty: false,
            },
            None,
        )
        .await
        .unwrap();
    h.orders.change_status_after_next_read(OrderStatus::Cancelled);
    let err = h.service.add_order_item(second.id, part.id, 2).await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Conflict { .. }));

    assert_eq!(h.orders.stored(second.id).unwrap().status, OrderStatus::Cancelled);
    assert_eq!(h.service.get_part(part.id).await.unwrap().stock_level, 5);
    assert!(h.service.list_order_items(second.id).await.unwrap().is_empty());
}

// ===== Items, stock and totals =====

#[tokio::test]
async fn test_order_item_captures_price_at_time() {
    print_test_header(
        "test_order_item_captures_price_at_time",
        &["Later price changes do not alter items already on an order"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "30.00").await;
    let part = h.service.upsert_part(new_part("CMP-01", 5, "45.00")).await.unwrap();

    println!("📝 Stage 1: Add two units at 45.00");
    let item = h.service.add_order_item(order.id, part.id, 2).await.unwrap();
    assert_eq!(item.price_at_time, money("45.00"));

    println!("📝 Stage 2: Raise the catalogue price");
    h.service.upsert_part(new_part("CMP-01", 3, "60.00")).await.unwrap();

    println!("📝 Stage 3: Item and total keep the captured price");
    let items = h.service.list_order_items(order.id).await.unwrap();
    assert_eq!(items[0].price_at_time, money("45.00"));
    let order = h.service.get_order(order.id).await.unwrap();
    assert_eq!(order.total_cost, money("120.00"));
}

#[tokio::test]
async fn test_stock_never_goes_negative() {
    print_test_header(
        "test_stock_never_goes_negative",
        &["Withdrawing more than available fails and leaves stock untouched"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "0").await;
    let part = h.service.upsert_part(new_part("FLT-9", 1, "5.00")).await.unwrap();

    let err = h.service.add_order_item(order.id, part.id, 2).await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Conflict { .. }));

    let err = h.service.adjust_stock(part.id, -5, "manual").await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Conflict { .. }));

    let part = h.service.get_part(part.id).await.unwrap();
    assert_eq!(part.stock_level, 1);
    assert!(h.service.list_order_items(order.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stock_adjustment_rejects_out_of_range_deltas() {
    print_test_header(
        "test_stock_adjustment_rejects_out_of_range_deltas",
        &["Extreme deltas are refused without touching the stored level"],
    );
    let h = create_test_service();
    let part = h.service.upsert_part(new_part("MTR-1", 3, "80.00")).await.unwrap();

    let err = h.service.adjust_stock(part.id, i32::MIN, "manual").await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Validation { .. }));

    let err = h.service.adjust_stock(part.id, i32::MAX, "manual").await.unwrap_err();
    assert!(matches!(err, ServiceDeskError::Validation { .. }));

    let part = h.service.get_part(part.id).await.unwrap();
    assert_eq!(part.stock_level, 3);
}

#[tokio::test]
async fn test_failed_item_insert_restores_stock() {
    print_test_header(
        "test_failed_item_insert_restores_stock",
        &["Stock taken for an item that could not be stored is put back"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "0").await;
    let part = h.service.upsert_part(new_part("BLT-2", 4, "7.00")).await.unwrap();

    h.order_items.fail_next_add();
    let err = h.service.add_order_item(order.id, part.id, 3).await.unwrap_err();

    assert_eq!(err, ServiceDeskError::Internal);
    assert_eq!(h.service.get_part(part.id).await.unwrap().stock_level, 4);
}

#[tokio::test]
async fn test_remove_item_restores_stock_and_total() {
    print_test_header(
        "test_remove_item_restores_stock_and_total",
        &["Removing an item returns its units and recomputes the total"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "15.00").await;
    let part = h.service.upsert_part(new_part("RLY-7", 6, "12.50")).await.unwrap();

    let item = h.service.add_order_item(order.id, part.id, 2).await.unwrap();
    assert_eq!(h.service.get_part(part.id).await.unwrap().stock_level, 4);

    h.service.remove_order_item(order.id, item.id).await.unwrap();

    assert_eq!(h.service.get_part(part.id).await.unwrap().stock_level, 6);
    let order = h.service.get_order(order.id).await.unwrap();
    assert_eq!(order.total_cost, money("15.00"));
}

#[tokio::test]
async fn test_terminal_orders_are_locked_for_billing() {
    print_test_header(
        "test_terminal_orders_are_locked_for_billing",
        &["Cancelled orders accept no parts, costs or diagnosis"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "10.00").await;
    let part = h.service.upsert_part(new_part("SNS-3", 5, "3.00")).await.unwrap();

    h.service
        .change_status(
            order.id,
            StatusChange {
                to: OrderStatus::Cancelled,
                changed_by_id: None,
                notes: Some("cliente desistió".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        h.service.add_order_item(order.id, part.id, 1).await,
        Err(ServiceDeskError::Conflict { .. })
    ));
    assert!(matches!(
        h.service.update_costs(order.id, Some(money("5.00")), None).await,
        Err(ServiceDeskError::Conflict { .. })
    ));
    assert!(matches!(
        h.service.record_diagnosis(order.id, "compresor").await,
        Err(ServiceDeskError::Conflict { .. })
    ));
    assert_eq!(h.service.get_part(part.id).await.unwrap().stock_level, 5);
}

// ===== Invoice and dashboard =====

#[tokio::test]
async fn test_invoice_totals() {
    print_test_header(
        "test_invoice_totals",
        &[
            "Invoice lines use captured prices and add labor",
            "Warranty orders owe nothing",
        ],
    );
    let h = create_test_service();
    let (client, equipment, order) = seed_order(&h.service, "40.00").await;
    let compressor = h.service.upsert_part(new_part("CMP-01", 5, "85.50")).await.unwrap();
    let relay = h.service.upsert_part(new_part("RLY-7", 10, "4.25")).await.unwrap();

    h.service.add_order_item(order.id, compressor.id, 1).await.unwrap();
    h.service.add_order_item(order.id, relay.id, 2).await.unwrap();

    println!("📝 Stage 1: Regular invoice");
    let invoice = h.service.invoice(order.id).await.unwrap();
    assert_eq!(invoice.client.id, client.id);
    assert_eq!(invoice.equipment.id, equipment.id);
    assert_eq!(invoice.lines.len(), 2);
    assert_eq!(invoice.parts_subtotal, money("94.00"));
    assert_eq!(invoice.labor_cost, money("40.00"));
    assert_eq!(invoice.total, money("134.00"));
    assert_eq!(invoice.amount_due, money("134.00"));
    assert_eq!(invoice.order.total_cost, invoice.total);

    println!("📝 Stage 2: Flag as warranty");
    h.service.update_costs(order.id, None, Some(true)).await.unwrap();
    let invoice = h.service.invoice(order.id).await.unwrap();
    assert_eq!(invoice.total, money("134.00"));
    assert_eq!(invoice.amount_due, money("0"));
}

#[tokio::test]
async fn test_dashboard_counts() {
    print_test_header(
        "test_dashboard_counts",
        &["Every status key is present; revenue counts delivered non-warranty orders"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "50.00").await;
    h.service.upsert_part(new_part("LOW-1", 1, "2.00")).await.unwrap();
    h.service.upsert_part(new_part("OK-1", 10, "2.00")).await.unwrap();
    h.service
        .create_technician(NewTechnician {
            full_name: "Carlos Ruiz".to_string(),
            specialty: Some("Refrigeración".to_string()),
            phone: None,
            commission_rate: money("10"),
        })
        .await
        .unwrap();

    for to in [OrderStatus::Completed, OrderStatus::Delivered] {
        h.service
            .change_status(
                order.id,
                StatusChange {
                    to,
                    changed_by_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    let summary = h.service.dashboard().await.unwrap();
    assert_eq!(summary.orders_by_status.len(), 10);
    assert!(summary
        .orders_by_status
        .contains(&(OrderStatus::Delivered, 1)));
    assert_eq!(summary.open_orders, 0);
    assert_eq!(summary.low_stock_parts, 1);
    assert_eq!(summary.active_technicians, 1);
    assert_eq!(summary.delivered_revenue, money("50.00"));
}

// ===== Technicians =====

#[tokio::test]
async fn test_inactive_technician_cannot_be_assigned() {
    print_test_header(
        "test_inactive_technician_cannot_be_assigned",
        &["Only active technicians take orders"],
    );
    let h = create_test_service();
    let (_, _, order) = seed_order(&h.service, "0").await;
    let tech = h
        .service
        .create_technician(NewTechnician {
            full_name: "Ana Lima".to_string(),
            specialty: None,
            phone: None,
            commission_rate: money("12.5"),
        })
        .await
        .unwrap();

    let assigned = h.service.assign_technician(order.id, Some(tech.id)).await.unwrap();
    assert_eq!(assigned.technician_id, Some(tech.id));

    h.service.set_technician_active(tech.id, false).await.unwrap();
    let err = h
        .service
        .assign_technician(order.id, Some(tech.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceDeskError::Validation { .. }));

    let unassigned = h.service.assign_technician(order.id, None).await.unwrap();
    assert_eq!(unassigned.technician_id, None);
}

#[tokio::test]
async fn test_equipment_must_belong_to_client() {
    print_test_header(
        "test_equipment_must_belong_to_client",
        &["An order cannot pair a client with someone else's appliance"],
    );
    let h = create_test_service();
    let (_, equipment, _) = seed_order(&h.service, "0").await;
    let other = h
        .service
        .upsert_client(new_client("0923456789", "Pedro Gil"))
        .await
        .unwrap();
    h.service.register_equipment(other.id, new_fridge()).await.unwrap();

    let err = h
        .service
        .create_order(
            NewServiceOrder {
                client_id: other.id,
                equipment_id: equipment.id,
                technician_id: None,
                reported_issue: None,
                labor_cost: money("0"),
                is_warranty: false,
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceDeskError::Validation { .. }));
}
