/// Short-lived token handed out by the Link widget after the user linked a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicToken(pub String);
