use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

macro_rules! category_icons {
    ($($variant:ident),+ $(,)?) => {
        /// Symbolic icon names a category can use.
        ///
        /// Stored and transferred as the bare name, e.g. `"ShoppingCart"`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum CategoryIcon {
            #[default]
            Category,
            $($variant),+
        }

        impl CategoryIcon {
            /// Icons offered by the category editor, in display order.
            pub const CHOICES: &'static [CategoryIcon] = &[$(CategoryIcon::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    CategoryIcon::Category => "Category",
                    $(CategoryIcon::$variant => stringify!($variant)),+
                }
            }
        }

        impl FromStr for CategoryIcon {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "Category" => Ok(CategoryIcon::Category),
                    $(stringify!($variant) => Ok(CategoryIcon::$variant),)+
                    other => Err(ValidationError::InvalidInput(format!(
                        "Unknown category icon '{}'",
                        other
                    ))),
                }
            }
        }
    };
}

category_icons!(
    Home,
    ShoppingCart,
    Fastfood,
    LocalCafe,
    DirectionsCar,
    Flight,
    Movie,
    MusicNote,
    FitnessCenter,
    LocalHospital,
    School,
    Work,
    Pets,
    LocalGroceryStore,
    LocalGasStation,
    LocalAtm,
    LocalLibrary,
    Restaurant,
    BeachAccess,
    DirectionsBus,
    DirectionsWalk,
    Train,
    LocalHotel,
    ChildCare,
    Palette,
    Book,
    LaptopMac,
    PhoneIphone,
    LocalParking,
    LocalLaundryService,
    LocalMall,
    Casino,
    Spa,
    LocalPharmacy,
    LocalShipping,
    LocalOffer,
    LocalPostOffice,
    LocalFlorist,
    LocalBar,
    DirectionsBike,
    DirectionsBoat,
    LocalAirport,
    CameraAlt,
    Brush,
    EventSeat,
    HeadsetMic,
    Keyboard,
    VideogameAsset,
    Watch,
    Weekend,
);

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for CategoryIcon {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryIcon> for String {
    fn from(icon: CategoryIcon) -> Self {
        icon.name().to_string()
    }
}
