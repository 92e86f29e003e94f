//! Payment provider adapters implementing the `PaymentGateway` port.

mod razorpay;

pub use razorpay::{DEFAULT_RAZORPAY_API_BASE, RazorpayCredentials, RazorpayGateway};
