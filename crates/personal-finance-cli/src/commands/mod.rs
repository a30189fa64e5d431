pub mod emi;
pub mod retirement;
pub mod sip;
pub mod tax;
