use common::question::Marks;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::UrlParam;
use crate::pages::home_page::HomePage;
use crate::pages::practice_page::PracticePage;
use crate::pages::study_page::StudyPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/study/:marks")]
    StudyPage { marks: UrlParam<Option<Marks>> },


    #[route("/practice/:marks")]
    PracticePage { marks: UrlParam<Option<Marks>> },

}

impl Route {
    pub fn study_page(marks: Option<Marks>) -> Self {
        Self::StudyPage { marks: UrlParam::from(marks) }
    }

    pub fn practice_page(marks: Option<Marks>) -> Self {
        Self::PracticePage { marks: UrlParam::from(marks) }
    }
}
