// Bookmarks have no router of their own: creation hangs off the posts
// routes and listing off the users routes.
pub mod repo;
