pub mod cards;
pub mod drawn_numbers;
pub mod kits;
pub mod prizes;
pub mod rounds;

pub use cards::Entity as Cards;
pub use cards::Model as Card;
pub use drawn_numbers::Entity as DrawnNumbers;
pub use drawn_numbers::Model as DrawnNumber;
pub use kits::Entity as Kits;
pub use kits::Model as Kit;
pub use prizes::Entity as Prizes;
pub use prizes::Model as Prize;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
