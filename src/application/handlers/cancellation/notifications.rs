//! Composition of the cancellation notification email.
//!
//! One message is composed per cancellation request and sent, separately,
//! to every recipient with an email on file.

use crate::domain::cancellation::CancellationRequest;
use crate::ports::Booking;

/// Subject and HTML body of the cancellation notice.
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationNotice {
    pub subject: String,
    pub html_body: String,
}

/// Composes the Vietnamese cancellation notice for a booking and request.
pub fn cancellation_notice(booking: &Booking, request: &CancellationRequest) -> CancellationNotice {
    let subject = format!("Thông báo hủy đặt sân #{}", booking.id);

    let schedule = booking
        .schedule_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "không rõ".to_string());
    let reason = request
        .user_reason
        .as_deref()
        .unwrap_or("không có lý do kèm theo");
    let qr_line = match &request.refund_qr_url {
        Some(url) => format!(
            "<p>Quét mã QR để hoàn tiền: <a href=\"{url}\">{url}</a></p>"
        ),
        None => "<p>Mã QR hoàn tiền sẽ được bổ sung sau.</p>".to_string(),
    };

    let html_body = format!(
        "<h3>Yêu cầu hủy đặt sân #{booking_id}</h3>\
         <p>Người yêu cầu: {role}</p>\
         <p>Ngày đá: {schedule}</p>\
         <p>Lý do: {reason}</p>\
         <ul>\
         <li>Tiền cọc: {refund}</li>\
         <li>Tiền phạt/bồi thường: {penalty}</li>\
         <li>Số tiền hoàn cuối cùng: {final_refund}</li>\
         </ul>\
         {qr_line}",
        booking_id = booking.id,
        role = request.requested_role.display_vi(),
        schedule = schedule,
        reason = reason,
        refund = request.refund_amount,
        penalty = request.penalty_amount,
        final_refund = request.final_refund_amount,
        qr_line = qr_line,
    );

    CancellationNotice { subject, html_body }
}
