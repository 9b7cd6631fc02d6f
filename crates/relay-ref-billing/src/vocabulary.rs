//! The production billing vocabulary.
//!
//! The trigger events the back office emits and the action types its
//! deployments register. The admin surface renders both listings as
//! select-box options; tests elsewhere construct their own minimal
//! vocabularies instead of importing this one.

use relay_contracts::vocabulary::Vocabulary;

/// Every trigger event the billing back office emits.
pub fn billing_vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();

    for (key, label) in [
        ("invoice.created", "Invoice Created"),
        ("invoice.paid", "Invoice Paid"),
        ("invoice.overdue", "Invoice Overdue"),
        ("invoice.cancelled", "Invoice Cancelled"),
        ("payment.received", "Payment Received"),
        ("payment.failed", "Payment Failed"),
        ("order.created", "Order Created"),
        ("service.created", "Service Created"),
        ("service.activated", "Service Activated"),
        ("service.suspended", "Service Suspended"),
        ("service.terminated", "Service Terminated"),
        ("service.renewed", "Service Renewed"),
        ("ticket.created", "Support Ticket Created"),
        ("ticket.replied", "Support Ticket Replied"),
        ("ticket.closed", "Support Ticket Closed"),
        ("ticket.sla_breached", "Support Ticket SLA Breached"),
        ("user.registered", "User Registered"),
        ("user.login", "User Login"),
    ] {
        vocab.register_trigger(key, label);
    }

    for (key, label) in [
        ("send_email", "Send Email"),
        ("send_sms", "Send SMS"),
        ("suspend_service", "Suspend Service"),
        ("terminate_service", "Terminate Service"),
        ("apply_credit", "Apply Account Credit"),
        ("create_ticket", "Create Support Ticket"),
        ("send_notification", "Send Notification"),
        ("update_status", "Update Status"),
        ("trigger_webhook", "Trigger Webhook"),
        ("add_tag", "Add Tag"),
        ("remove_tag", "Remove Tag"),
    ] {
        vocab.register_action(key, label);
    }

    vocab
}
