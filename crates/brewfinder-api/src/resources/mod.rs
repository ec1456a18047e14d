// Resource endpoint modules
//
// One file per backend resource, implemented as inherent methods on
// `BreweryClient`. Mutations follow the backend's verb-in-path convention
// (`/data/{table}/create`, `/{id}/update`, `/{id}/delete`) rather than
// bare REST verbs against the collection URL.

mod beers;
mod breweries;
mod photos;
mod tables;
mod users;
